use crate::{
    CaskError, Column, CqlWriter, DefaultCqlWriter, Executor, Predicate, Result, TableRef, Value,
    truncate_long, writer::Context,
};
use std::{
    fmt::{self, Formatter},
    future::Future,
};

/// A complete CQL statement targeting one table.
pub trait Statement: Send + Sync {
    /// Target of the statement.
    fn table(&self) -> &TableRef;

    /// Checks that can only be done once the statement is complete.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String);

    /// Render the statement with `writer`, returns the text and the bound parameters in
    /// placeholder order.
    fn build_query_with(&self, writer: &dyn CqlWriter) -> Result<(String, Vec<Value>)> {
        self.validate()?;
        let mut context = Context::default();
        let mut out = String::with_capacity(128);
        self.write_query(writer, &mut context, &mut out);
        Ok((out, context.parameters))
    }

    /// Render the statement using [`DefaultCqlWriter`].
    fn build_query(&self) -> Result<(String, Vec<Value>)> {
        self.build_query_with(DefaultCqlWriter.as_dyn())
    }

    /// Build the statement and send it through `executor`, once.
    fn execute<E: Executor>(
        &self,
        executor: &mut E,
    ) -> impl Future<Output = Result<E::Output>> + Send
    where
        Self: Sized,
    {
        let query = self.build_query();
        async move {
            let (statement, parameters) = query?;
            log::debug!(
                "Executing {} with {} parameters",
                truncate_long!(statement),
                parameters.len()
            );
            executor.execute(statement, parameters).await
        }
    }
}

pub(crate) fn check_column(clause: &'static str, table: &TableRef, column: &Column) -> Result<()> {
    if !column.belongs_to(table) {
        return Err(CaskError::validation(
            clause,
            format!(
                "column `{}` does not belong to `{}`",
                column.full_name(),
                table
            ),
        ));
    }
    Ok(())
}

/// Materialized views are read only.
pub(crate) fn check_writable(clause: &'static str, table: &TableRef) -> Result<()> {
    if table.is_view() {
        return Err(CaskError::validation(
            clause,
            format!("`{table}` is a materialized view of `{}`", table.base),
        ));
    }
    Ok(())
}

/// Accept a non empty list of predicates on columns of `table`.
pub(crate) fn check_predicates(
    table: &TableRef,
    predicates: impl IntoIterator<Item = Predicate>,
) -> Result<Vec<Predicate>> {
    let predicates = predicates.into_iter().collect::<Vec<_>>();
    if predicates.is_empty() {
        return Err(CaskError::validation(
            "WHERE",
            format!("no predicate given for `{table}`"),
        ));
    }
    for predicate in &predicates {
        check_column("WHERE", table, &predicate.column)?;
    }
    Ok(predicates)
}

/// Statement text without the parameters, used by `Display`.
pub(crate) fn fmt_statement(statement: &impl Statement, f: &mut Formatter<'_>) -> fmt::Result {
    let mut out = String::with_capacity(128);
    statement.write_query(DefaultCqlWriter.as_dyn(), &mut Context::default(), &mut out);
    f.write_str(&out)
}
