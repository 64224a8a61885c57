use crate::{ColumnType, Error};
use thiserror::Error;

/// Failures raised while declaring tables or composing statements.
///
/// Every fallible call of this crate returns an [`anyhow::Error`]; when the failure originates
/// here the error wraps a `CaskError` that can be recovered with `downcast_ref::<CaskError>()`.
/// Errors coming from an [`Executor`](crate::Executor) are propagated untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaskError {
    /// A clause is empty, inconsistent with the statement target or out of bounds.
    #[error("Invalid {clause} clause: {reason}")]
    Validation { clause: &'static str, reason: String },

    /// The value bound to a column is not compatible with its declared type.
    #[error("Column `{column}` of type {expected} cannot hold a value of type {found}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        found: String,
    },

    /// The table does not declare the requested materialized view.
    #[error("Table `{table}` does not have a view associated with `{key}`")]
    NotFound { table: String, key: String },
}

impl CaskError {
    pub fn validation(clause: &'static str, reason: impl Into<String>) -> Error {
        Error::new(CaskError::Validation {
            clause,
            reason: reason.into(),
        })
    }
    pub fn is_validation(&self) -> bool {
        matches!(self, CaskError::Validation { .. })
    }
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, CaskError::TypeMismatch { .. })
    }
    pub fn is_not_found(&self) -> bool {
        matches!(self, CaskError::NotFound { .. })
    }
}
