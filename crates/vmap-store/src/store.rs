//! Encrypted table store.
//!
//! Blob wire format:
//!   [ version (1 byte) | nonce (24 bytes) | ciphertext + tag ]
//!
//! XChaCha20-Poly1305 under a key derived from (password, deployment salt).
//! The version byte is fed to the cipher as associated data, so it is
//! authenticated along with the payload.

use std::path::Path;

use chacha20poly1305::{
    XChaCha20Poly1305,
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng},
};
use tracing::debug;
use zeroize::Zeroizing;

use vmap_model::DataTable;

use crate::error::{Result, StoreError};
use crate::kdf::{TableKey, derive_key};
use crate::salt::Salt;

/// Current blob format version.
pub const BLOB_VERSION: u8 = 1;

/// XChaCha20-Poly1305 nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// Serialize `table` and write it encrypted to `path`, overwriting any
/// existing file.
///
/// No partial-write recovery is attempted: a crash mid-write can leave a
/// corrupt file behind, and the next `load` will report it as an
/// `InvalidCredential` failure.
pub fn store(table: &DataTable, path: &Path, password: &str, salt: &Salt) -> Result<()> {
    let plaintext = Zeroizing::new(serde_json::to_vec(table)?);
    let key = derive_key(password, salt);
    let blob = seal(&key, &plaintext)?;
    std::fs::write(path, blob).map_err(|e| StoreError::io(path, e))?;
    debug!(path = %path.display(), rows = table.row_count(), "stored encrypted table");
    Ok(())
}

/// Read the blob at `path` and decrypt it back into a table.
///
/// Wrong password and corrupted ciphertext both surface as
/// [`StoreError::InvalidCredential`]; the AEAD tag check cannot tell them
/// apart and the store does not try to.
pub fn load(path: &Path, password: &str, salt: &Salt) -> Result<DataTable> {
    let blob = std::fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let key = derive_key(password, salt);
    let plaintext = open(&key, &blob)?;
    let table: DataTable = serde_json::from_slice(&plaintext)?;
    debug!(path = %path.display(), rows = table.row_count(), "loaded encrypted table");
    Ok(table)
}

fn seal(key: &TableKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher =
        XChaCha20Poly1305::new_from_slice(&key.0).map_err(|_| StoreError::Encrypt)?;
    let nonce = XChaCha20Poly1305::generate_nonce(&mut AeadOsRng);
    let ciphertext = cipher
        .encrypt(
            &nonce,
            chacha20poly1305::aead::Payload {
                msg: plaintext,
                aad: &[BLOB_VERSION],
            },
        )
        .map_err(|_| StoreError::Encrypt)?;

    let mut out = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
    out.push(BLOB_VERSION);
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn open(key: &TableKey, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let Some((&version, rest)) = blob.split_first() else {
        return Err(StoreError::InvalidCredential);
    };
    if version != BLOB_VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }
    if rest.len() < NONCE_LEN {
        return Err(StoreError::InvalidCredential);
    }
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce = chacha20poly1305::XNonce::from_slice(nonce_bytes);

    let cipher =
        XChaCha20Poly1305::new_from_slice(&key.0).map_err(|_| StoreError::InvalidCredential)?;
    let plaintext = cipher
        .decrypt(
            nonce,
            chacha20poly1305::aead::Payload {
                msg: ciphertext,
                aad: &[version],
            },
        )
        .map_err(|_| StoreError::InvalidCredential)?;
    Ok(Zeroizing::new(plaintext))
}
