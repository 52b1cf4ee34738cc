use std::borrow::Cow;

use thiserror::Error;

/// Top-level error type returned by eventform stores and assembly routines.
#[derive(Debug, Error)]
pub enum FormError {
    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// Target entity was not found when performing an operation.
    #[error("entity not found")]
    NotFound { entity_id: Option<String> },

    /// Invalid input supplied to a store/search operation.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// The external storage collaborator failed. Write-path callers must
    /// surface this to the user; read-path callers may fall back to cached
    /// data.
    #[error("store error: {message}")]
    Store { message: String },

    /// Catch-all for error kinds that have no dedicated variant.
    #[error("{message}")]
    Other { message: Cow<'static, str> },
}

/// Collection of validation issues encountered while checking a template or a
/// submission. Submission is blocked while the collection is non-empty; no
/// partial submit happens.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// First issue reported for the given field name, if any. The review UI
    /// renders these inline beneath the offending control.
    pub fn for_field(&self, field: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }
}

/// Detailed validation failure for a single field or logical path.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used when validation passed.
pub type ValidationResult<T> = Result<T, ValidationError>;
