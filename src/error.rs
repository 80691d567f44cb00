//! Unified error type for the status-kv library.
//!
//! Transport failures are carried through untouched as [`Error::Backend`];
//! [`Error::InvalidScalar`] covers text that cannot be read as a scalar.

use thiserror::Error;

/// Opaque failure surfaced by an [`ItemStore`](crate::ItemStore) transport.
///
/// Connectivity, throttling, permission and schema problems all arrive as
/// this type. The client never retries or translates them.
pub type BackendError = anyhow::Error;

/// Error type for all status-kv client operations.
///
/// # Example
///
/// ```ignore
/// use status_kv::{MemoryItemStore, Result, StatusClient};
///
/// fn touch(client: &StatusClient<MemoryItemStore>) -> Result<()> {
///     client.store("job-1", 200)?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Failure reported by the item store transport.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Text that could not be read as the requested scalar kind.
    #[error("Invalid {kind} scalar: '{text}'")]
    InvalidScalar { kind: &'static str, text: String },
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this error came from the transport.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }

    /// Borrow the transport error, if this is one.
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_display_unchanged() {
        let err = Error::from(anyhow::anyhow!("throttled"));
        assert!(err.is_backend());
        assert_eq!(err.to_string(), "throttled");
        assert_eq!(err.backend().map(|e| e.to_string()).as_deref(), Some("throttled"));
    }

    #[test]
    fn invalid_scalar_names_kind_and_text() {
        let err = Error::InvalidScalar {
            kind: "int",
            text: "1.5".to_string(),
        };
        assert!(!err.is_backend());
        assert!(err.backend().is_none());
        assert_eq!(err.to_string(), "Invalid int scalar: '1.5'");
    }
}
