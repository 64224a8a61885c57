use crate::{
    Aggregate, Column, Expression,
    writer::{Context, CqlWriter},
};

/// Item of a SELECT list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    Column(Column),
    Aggregate(Aggregate),
}

impl Projection {
    /// Column the projection reads.
    pub fn column(&self) -> &Column {
        match self {
            Projection::Column(v) => v,
            Projection::Aggregate(v) => &v.column,
        }
    }
}

impl From<Column> for Projection {
    fn from(value: Column) -> Self {
        Projection::Column(value)
    }
}

impl From<Aggregate> for Projection {
    fn from(value: Aggregate) -> Self {
        Projection::Aggregate(value)
    }
}

impl Expression for Projection {
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        match self {
            Projection::Column(v) => v.write_query(writer, context, out),
            Projection::Aggregate(v) => v.write_query(writer, context, out),
        }
    }
}
