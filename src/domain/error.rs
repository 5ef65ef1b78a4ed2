//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Action;

/// Domain errors represent invalid input or an inconsistent toolchain description.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown build variant '{given}' (valid variants: {allowed})")]
    UnknownVariant { given: String, allowed: String },

    #[error("'{action}' does not take a build variant")]
    VariantNotApplicable { action: Action },

    #[error("invalid variant catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("invalid toolchain: {message}")]
    InvalidToolchain { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
