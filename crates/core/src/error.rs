use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures of the shared value types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Opaque identifiers may be anything except blank.
    #[error("{kind} must not be blank")]
    BlankId { kind: &'static str },
}
