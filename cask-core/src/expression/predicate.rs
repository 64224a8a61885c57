use crate::{
    Column, Expression, Operator, TableRef, Value,
    writer::{Context, CqlWriter},
};

/// Single comparison `column <op> ?` of a WHERE clause.
///
/// Built through the comparison methods of [`Column`], which check the value against the
/// declared column type, so a `Predicate` always holds a bindable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Column,
    pub op: Operator,
    pub value: Value,
}

impl Predicate {
    pub fn belongs_to(&self, table: &TableRef) -> bool {
        self.column.belongs_to(table)
    }
}

impl Expression for Predicate {
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        writer.write_predicate(context, out, self);
    }
}
