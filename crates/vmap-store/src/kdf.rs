//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA256 with a fixed iteration count. The parameters are
//! shared constants between store and load; the blob's version byte is what
//! allows them to change in a future format revision.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::salt::Salt;

/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 390_000;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;

/// 32-byte table key derived from the user password. Zeroized on drop;
/// never persisted, recomputed for every store/load call.
#[derive(ZeroizeOnDrop)]
pub struct TableKey(pub(crate) [u8; KEY_LEN]);

/// Derive the table key from a password and the deployment salt.
pub fn derive_key(password: &str, salt: &Salt) -> TableKey {
    let mut output = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        KDF_ITERATIONS,
        &mut output,
    );
    TableKey(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic_per_password() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("salt.txt");
        let salt = Salt::generate(&path).expect("generate salt");
        assert_eq!(derive_key("hunter2", &salt).0, derive_key("hunter2", &salt).0);
        assert_ne!(derive_key("hunter2", &salt).0, derive_key("hunter3", &salt).0);
    }
}
