use crate::writer::{Context, CqlWriter};
use std::fmt::Debug;

/// A renderable CQL expression node.
pub trait Expression: Send + Sync + Debug {
    /// Serialize the expression into the output string using the cql writer.
    ///
    /// Values bound by the expression are appended to `context.parameters`, in the same order
    /// their `?` placeholders are written.
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String);
}

impl<T: Expression> Expression for &T {
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        (*self).write_query(writer, context, out);
    }
}

impl Expression for &dyn Expression {
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        (*self).write_query(writer, context, out);
    }
}
