use thiserror::Error;

/// Errors raised while interpreting user input or stored values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid position: {0} (expected one of P, C, IF, OF)")]
    InvalidPosition(String),

    #[error("non-numeric identifier: {0}")]
    InvalidIdentifier(String),

    #[error("non-numeric result: {0}")]
    InvalidResult(String),

    #[error("unparseable date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
