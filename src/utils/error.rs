use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation failed for {field} (got {value:?}): {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{field} cannot be changed after instantiation")]
    ImmutableField { field: &'static str },
}

pub type Result<T> = std::result::Result<T, DomainError>;
