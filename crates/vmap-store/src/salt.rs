//! Deployment salt handling.
//!
//! One salt per deployment, persisted as a single line of lowercase hex.
//! Every key derivation uses it, so it is generated exactly once;
//! regenerating it would invalidate every previously written store.

use std::path::Path;

use rand::RngCore;

use crate::error::{Result, StoreError};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// The deployment-wide key-derivation salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Read the salt from its hex-encoded file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let line = contents.lines().next().unwrap_or("").trim();
        let bytes = hex::decode(line).map_err(|e| StoreError::Salt {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let bytes: [u8; SALT_LEN] = bytes.try_into().map_err(|decoded: Vec<u8>| StoreError::Salt {
            path: path.to_path_buf(),
            message: format!("expected {SALT_LEN} bytes, found {}", decoded.len()),
        })?;
        Ok(Self(bytes))
    }

    /// Generate a fresh salt and persist it. Refuses to overwrite an existing
    /// salt file.
    pub fn generate(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(StoreError::SaltExists {
                path: path.to_path_buf(),
            });
        }
        let mut bytes = [0u8; SALT_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let salt = Self(bytes);
        std::fs::write(path, format!("{}\n", hex::encode(bytes)))
            .map_err(|e| StoreError::io(path, e))?;
        Ok(salt)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_round_trips_generate() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("salt.txt");
        let generated = Salt::generate(&path).expect("generate salt");
        let loaded = Salt::load(&path).expect("load salt");
        assert_eq!(generated, loaded);
    }

    #[test]
    fn generate_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("salt.txt");
        Salt::generate(&path).expect("first generate");
        assert!(matches!(
            Salt::generate(&path),
            Err(StoreError::SaltExists { .. })
        ));
    }

    #[test]
    fn load_rejects_short_salt() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("salt.txt");
        std::fs::write(&path, "deadbeef\n").expect("write short salt");
        assert!(matches!(Salt::load(&path), Err(StoreError::Salt { .. })));
    }
}
