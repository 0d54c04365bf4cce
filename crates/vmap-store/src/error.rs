#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Authenticated decryption failed. Wrong password and tampered or
    /// corrupted ciphertext are indistinguishable here; the integrity tag is
    /// the only signal and it does not separate the two.
    #[error("decryption failed: wrong password or corrupted store")]
    InvalidCredential,

    #[error("unsupported store format version {0}")]
    UnsupportedVersion(u8),

    #[error("encryption failed")]
    Encrypt,

    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid salt file {path}: {message}")]
    Salt { path: PathBuf, message: String },

    #[error("salt file {path} already exists; regenerating would orphan every existing store")]
    SaltExists { path: PathBuf },

    #[error("failed to decode stored table: {0}")]
    Payload(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
