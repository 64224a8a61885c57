mod context;
mod cql_writer;

pub use context::*;
pub use cql_writer::*;
