use crate::{
    CqlWriter, Predicate, Result, Statement, TableDef, TableRef,
    statement::{check_predicates, check_writable, fmt_statement},
    writer::Context,
};
use std::fmt::{self, Display, Formatter};

/// `DELETE` statement, without a WHERE clause it removes every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    table: TableRef,
    predicates: Vec<Predicate>,
    if_exists: bool,
}

impl Delete {
    pub fn table(table: &TableDef) -> Self {
        Self {
            table: table.table_ref().clone(),
            predicates: Vec::new(),
            if_exists: false,
        }
    }

    /// Add `predicates` to the WHERE clause, joined with `AND`.
    pub fn filter(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Result<Self> {
        check_writable("DELETE", &self.table)?;
        let predicates = check_predicates(&self.table, predicates)?;
        self.predicates.extend(predicates);
        Ok(self)
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
    pub fn is_if_exists(&self) -> bool {
        self.if_exists
    }
}

impl Statement for Delete {
    fn table(&self) -> &TableRef {
        &self.table
    }
    fn validate(&self) -> Result<()> {
        check_writable("DELETE", &self.table)
    }
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        writer.write_delete(context, out, self);
    }
}

impl Display for Delete {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_statement(self, f)
    }
}
