use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonError {
    /// The value has the wrong JSON type.
    #[error("input must be a string, got {found}")]
    InvalidInput { found: &'static str },
}

pub type Result<T> = std::result::Result<T, CommonError>;
