use crate::{
    AggregateOp, Column, Expression, Result,
    column::check_alias,
    writer::{Context, CqlWriter},
};

/// Column wrapped in an aggregate function, rendered as `OP(name) [AS alias]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aggregate {
    pub column: Column,
    pub op: AggregateOp,
    pub alias: Option<&'static str>,
}

impl Aggregate {
    pub fn new(column: Column, op: AggregateOp) -> Self {
        Self {
            column,
            op,
            alias: None,
        }
    }
    pub fn alias(self, alias: &'static str) -> Result<Self> {
        check_alias(alias)?;
        Ok(Self {
            alias: Some(alias),
            ..self
        })
    }
}

impl Expression for Aggregate {
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        writer.write_aggregate(context, out, self);
    }
}
