//! Encryption at rest for patient-adjacent tables.
//!
//! A table is serialized, encrypted under a key derived from a user password
//! and a deployment-wide salt, and written as one opaque blob. Decryption is
//! authenticated: tampering and wrong passwords are both detected at load
//! time and rejected with the same error.

pub mod error;
pub mod kdf;
pub mod salt;
pub mod store;

pub use error::{Result, StoreError};
pub use kdf::{KDF_ITERATIONS, KEY_LEN, TableKey, derive_key};
pub use salt::{SALT_LEN, Salt};
pub use store::{BLOB_VERSION, NONCE_LEN, load, store};
