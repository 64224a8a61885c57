use crate::{
    CaskError, Column, CqlWriter, Predicate, Result, Statement, TableDef, TableRef, Value,
    statement::{check_column, check_predicates, check_writable, fmt_statement},
    writer::Context,
};
use std::fmt::{self, Display, Formatter};

/// `UPDATE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    table: TableRef,
    assignments: Vec<(Column, Value)>,
    predicates: Vec<Predicate>,
    if_exists: bool,
}

impl Update {
    pub fn table(table: &TableDef) -> Self {
        Self {
            table: table.table_ref().clone(),
            assignments: Vec::new(),
            predicates: Vec::new(),
            if_exists: false,
        }
    }

    /// Assign `value` to `column`.
    ///
    /// Setting the same column again replaces the value and keeps the original position.
    pub fn set(mut self, column: Column, value: impl Into<Value>) -> Result<Self> {
        check_writable("UPDATE", &self.table)?;
        check_column("SET", &self.table, &column)?;
        let value = column.bind(value)?;
        match self
            .assignments
            .iter_mut()
            .find(|(c, _)| c.name == column.name)
        {
            Some((_, current)) => *current = value,
            None => self.assignments.push((column, value)),
        }
        Ok(self)
    }

    /// Add `predicates` to the WHERE clause, joined with `AND`.
    pub fn filter(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Result<Self> {
        check_writable("UPDATE", &self.table)?;
        let predicates = check_predicates(&self.table, predicates)?;
        self.predicates.extend(predicates);
        Ok(self)
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn assignments(&self) -> &[(Column, Value)] {
        &self.assignments
    }
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
    pub fn is_if_exists(&self) -> bool {
        self.if_exists
    }
}

impl Statement for Update {
    fn table(&self) -> &TableRef {
        &self.table
    }
    fn validate(&self) -> Result<()> {
        check_writable("UPDATE", &self.table)?;
        if self.assignments.is_empty() {
            return Err(CaskError::validation(
                "SET",
                format!("no column assigned in the update of `{}`", self.table),
            ));
        }
        Ok(())
    }
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        writer.write_update(context, out, self);
    }
}

impl Display for Update {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_statement(self, f)
    }
}
