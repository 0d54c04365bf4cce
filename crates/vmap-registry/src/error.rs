#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The persisted table failed a structural invariant: IDs out of
    /// sequence at load, or a pre-existing record that changed during an
    /// update. Fatal; nothing is written once this is detected.
    #[error("definition table integrity violation: {message}")]
    DataIntegrityViolation { message: String },

    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid {field} value {value:?} in {path}")]
    Field {
        path: PathBuf,
        field: String,
        value: String,
    },

    #[error("definition table {path} already exists")]
    AlreadyInitialized { path: PathBuf },

    #[error("no definition record with id {0}")]
    UnknownId(u64),

    #[error("id {0} requested more than once")]
    DuplicateId(u64),

    #[error("definition record {0} is already invalid")]
    AlreadyInvalid(u64),

    #[error(transparent)]
    Ingest(#[from] vmap_ingest::IngestError),
}

impl RegistryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrityViolation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
