//! Domain error model.

use thiserror::Error;

use crate::quantity::Quantity;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic domain failures (validation, contract
/// violations, lookups). Storage concerns belong to the persistence crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input or configuration).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A container was asked to add or remove more than its capacity or
    /// content permits. This is a programming error in the caller.
    #[error("contract violation: {operation} of {requested} exceeds {permitted}")]
    ContractViolation {
        operation: &'static str,
        requested: Quantity,
        permitted: Quantity,
    },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found: {0}")]
    NotFound(String),

    /// A conflict occurred (e.g. duplicate catalog entry).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `add_items` asked for more than `max_acceptable` allowed.
    pub fn over_capacity(requested: Quantity, permitted: Quantity) -> Self {
        Self::ContractViolation {
            operation: "add",
            requested,
            permitted,
        }
    }

    /// `remove_items` asked for more than the slot holds.
    pub fn over_removal(requested: Quantity, held: Quantity) -> Self {
        Self::ContractViolation {
            operation: "remove",
            requested,
            permitted: held,
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}
