use crate::{Result, Value};
use std::future::Future;

/// Capability to send one rendered statement to the database.
///
/// Implemented by the driver integration (Scylla, Cassandra, an in-memory fake). The statement
/// text uses positional `?` placeholders, `parameters` holds one value per placeholder in order.
pub trait Executor: Send {
    /// Whatever the driver returns for a statement (a result set, rows affected, `()`).
    type Output: Send;

    fn execute(
        &mut self,
        statement: String,
        parameters: Vec<Value>,
    ) -> impl Future<Output = Result<Self::Output>> + Send;
}
