//! Advisory read-only protection for the persisted table.
//!
//! The permission bit is not a mutual-exclusion primitive: it stops this
//! process (and casual edits) from writing through a stale handle, and
//! nothing more. Two refreshes from separate processes can still race in the
//! unlocked window; that limitation is documented, not solved here.

use std::io;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::error::{RegistryError, Result};

/// Owner read/write while unlocked.
#[cfg(unix)]
const UNLOCKED_MODE: u32 = 0o600;

/// Read-only for everyone while locked.
#[cfg(unix)]
const LOCKED_MODE: u32 = 0o444;

#[cfg(unix)]
pub(crate) fn set_protected(path: &Path, protected: bool) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = if protected { LOCKED_MODE } else { UNLOCKED_MODE };
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
pub(crate) fn set_protected(path: &Path, protected: bool) -> io::Result<()> {
    let mut perms = std::fs::metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(protected);
    std::fs::set_permissions(path, perms)
}

/// Re-apply protection, surfacing any failure.
pub(crate) fn protect(path: &Path) -> Result<()> {
    set_protected(path, true).map_err(|e| RegistryError::io(path, e))
}

/// Lifts the read-only protection on construction and guarantees it is
/// reinstated: either explicitly through [`WriteUnlock::relock`], or on drop
/// for every early-exit path. A failed relock on the success path is an
/// error; on the drop path it can only be logged.
pub(crate) struct WriteUnlock {
    path: PathBuf,
    armed: bool,
}

impl WriteUnlock {
    pub(crate) fn new(path: &Path) -> Result<Self> {
        set_protected(path, false).map_err(|e| RegistryError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            armed: true,
        })
    }

    pub(crate) fn relock(mut self) -> Result<()> {
        self.armed = false;
        protect(&self.path)
    }
}

impl Drop for WriteUnlock {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = set_protected(&self.path, true) {
                error!(path = %self.path.display(), error = %e, "failed to restore read-only protection");
            }
        }
    }
}
