mod as_value;
mod column;
mod column_type;
mod config;
mod decode_type;
mod error;
mod executor;
mod expression;
mod metadata;
mod statement;
mod table;
mod util;
mod value;
pub mod writer;

pub use ::anyhow::Context;
pub use as_value::*;
pub use column::*;
pub use column_type::*;
pub use config::*;
pub use decode_type::*;
pub use error::*;
pub use executor::*;
pub use expression::*;
pub use metadata::*;
pub use statement::*;
pub use table::*;
pub use util::*;
pub use value::*;
pub use writer::{CqlWriter, DefaultCqlWriter};

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
