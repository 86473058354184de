//! Unified error type for all catalog operations.

/// Things that can go wrong when using the catalog.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A new record is missing a field or has a malformed one.
    #[error("validation error: {0}")]
    Validation(String),
    /// A record with the same name already exists.
    #[error("conflict: {0}")]
    Conflict(String),
    /// No record with the requested name.
    #[error("not found: {0}")]
    NotFound(String),
    /// File system problem (read, write, rename).
    #[error("i/o error: {0}")]
    Io(String),
    /// Failed to serialize the catalog to bytes.
    #[error("serialization error: {0}")]
    Serialize(String),
    /// Failed to deserialize bytes back into a catalog.
    #[error("deserialization error: {0}")]
    Deserialize(String),
    /// Bad configuration (invalid path, etc.).
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// `true` for errors caused by the caller's input rather than the store.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Conflict(_) | Error::NotFound(_)
        )
    }

    /// `true` when writing the snapshot failed.
    #[must_use]
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Serialize(_))
    }

    /// Message without the kind prefix, suitable for response bodies.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Error::Validation(msg)
            | Error::Conflict(msg)
            | Error::NotFound(msg)
            | Error::Io(msg)
            | Error::Serialize(msg)
            | Error::Deserialize(msg)
            | Error::Config(msg) => msg,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_eof() || err.is_data() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
