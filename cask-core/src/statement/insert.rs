use crate::{
    CaskError, CqlWriter, Result, Row, Statement, Table, TableDef, TableRef,
    statement::{check_column, check_writable, fmt_statement},
    writer::Context,
};
use std::fmt::{self, Display, Formatter};

/// `INSERT` statement.
///
/// A single row renders as a plain `INSERT`, several rows are wrapped in one
/// `BEGIN BATCH ... APPLY BATCH` statement. Large loads are better served by the batch support
/// of the driver itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    table: TableRef,
    rows: Vec<Row>,
    if_not_exists: bool,
}

impl Insert {
    pub fn table(table: &TableDef) -> Self {
        Self {
            table: table.table_ref().clone(),
            rows: Vec::new(),
            if_not_exists: false,
        }
    }

    /// Append the rows of `values`, their table must be the target.
    pub fn values<'a, T: Table + 'a>(
        mut self,
        values: impl IntoIterator<Item = &'a T>,
    ) -> Result<Self> {
        check_writable("INSERT", &self.table)?;
        let source = T::table_def().table_ref();
        if source.keyspace != self.table.keyspace || source.base != self.table.base {
            return Err(CaskError::validation(
                "INSERT",
                format!("rows of `{source}` cannot be inserted into `{}`", self.table),
            ));
        }
        for value in values {
            self = self.row(value.row())?;
        }
        Ok(self)
    }

    /// Append a row of explicit column/value pairs.
    pub fn row(mut self, row: Row) -> Result<Self> {
        check_writable("INSERT", &self.table)?;
        if row.is_empty() {
            return Err(CaskError::validation(
                "INSERT",
                format!("empty row for `{}`", self.table),
            ));
        }
        let mut bound = Row::with_capacity(row.len());
        for (column, value) in row {
            check_column("INSERT", &self.table, &column)?;
            if bound.iter().any(|(c, _)| c.name == column.name) {
                return Err(CaskError::validation(
                    "INSERT",
                    format!("column `{}` appears twice in the same row", column.name),
                ));
            }
            let value = column.bind(value)?;
            bound.push((column, value));
        }
        self.rows.push(bound);
        Ok(self)
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
    pub fn is_if_not_exists(&self) -> bool {
        self.if_not_exists
    }
}

impl Statement for Insert {
    fn table(&self) -> &TableRef {
        &self.table
    }
    fn validate(&self) -> Result<()> {
        check_writable("INSERT", &self.table)?;
        if self.rows.is_empty() {
            return Err(CaskError::validation(
                "INSERT",
                format!("no rows to insert into `{}`", self.table),
            ));
        }
        Ok(())
    }
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        writer.write_insert(context, out, self);
    }
}

impl Display for Insert {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_statement(self, f)
    }
}
