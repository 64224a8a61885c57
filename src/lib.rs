pub use cask_core::*;
pub use cask_core::Table;
pub use cask_macros::Table;
