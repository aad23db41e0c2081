//! Typed error enum for the service layer.
//!
//! Every command fails with exactly one of these; the presentation layer
//! turns them into status messages.

use physlog_core::{
    CoreError, MSG_NON_NUMERIC_ID, MSG_NON_NUMERIC_RESULT, MSG_UNKNOWN_SUBJECT,
};
use physlog_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed user input (identifier, result, position, empty field).
    #[error("validation: {0}")]
    Validation(String),

    /// Named subject is not in the registry snapshot.
    #[error("lookup: {0}")]
    Lookup(String),

    /// Strict mode rejected a duplicate name or identifier.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store could not be reached, even after retries.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Any other storage failure.
    #[error("storage: {0}")]
    Storage(#[source] StorageError),
}

impl ServiceError {
    /// Message shown to the dashboard user, in the dashboard's own wording
    /// where one exists.
    #[must_use]
    pub fn status_message(&self) -> String {
        match self {
            Self::Lookup(_) => MSG_UNKNOWN_SUBJECT.to_owned(),
            Self::Validation(msg) if msg.starts_with("non-numeric result") => {
                MSG_NON_NUMERIC_RESULT.to_owned()
            },
            Self::Validation(msg) if msg.starts_with("non-numeric identifier") => {
                MSG_NON_NUMERIC_ID.to_owned()
            },
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => Self::StoreUnavailable(msg),
            other => Self::Storage(other),
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_storage_maps_to_store_unavailable() {
        let err = ServiceError::from(StorageError::Unavailable("pool timed out".to_owned()));
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));
        let err = ServiceError::from(StorageError::Migration("x".to_owned()));
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[test]
    fn status_messages_use_dashboard_wording() {
        let lookup = ServiceError::Lookup("unknown subject: Unknown".to_owned());
        assert_eq!(lookup.status_message(), MSG_UNKNOWN_SUBJECT);

        let result = ServiceError::from(CoreError::InvalidResult("abc".to_owned()));
        assert_eq!(result.status_message(), MSG_NON_NUMERIC_RESULT);

        let id = ServiceError::from(CoreError::InvalidIdentifier("x".to_owned()));
        assert_eq!(id.status_message(), MSG_NON_NUMERIC_ID);

        let pos = ServiceError::from(CoreError::InvalidPosition("DH".to_owned()));
        assert!(pos.status_message().contains("invalid position"));
    }
}
