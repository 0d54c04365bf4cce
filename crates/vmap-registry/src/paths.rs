//! Registry directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the resources directory.
pub const RESOURCES_ENV_VAR: &str = "VMAP_RESOURCES_DIR";

/// Environment variable for overriding the exports directory.
pub const EXPORTS_ENV_VAR: &str = "VMAP_EXPORTS_DIR";

/// Get the resources root directory.
///
/// Resolution order:
/// 1. `VMAP_RESOURCES_DIR` environment variable
/// 2. `Resources/` relative to the working directory
pub fn resources_root() -> PathBuf {
    if let Ok(root) = std::env::var(RESOURCES_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from("Resources")
}

/// Get the exports root directory (`VMAP_EXPORTS_DIR`, else `Exports/`).
pub fn exports_root() -> PathBuf {
    if let Ok(root) = std::env::var(EXPORTS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from("Exports")
}

/// The three locations the registry touches.
#[derive(Debug, Clone)]
pub struct RegistryPaths {
    /// The authoritative, permission-locked definition table.
    pub persistent: PathBuf,
    /// Directory of candidate update files, scanned on every refresh.
    pub candidate_dir: PathBuf,
    /// Downstream copy written after each successful update.
    pub export: PathBuf,
}

impl RegistryPaths {
    /// Conventional layout under the resolved resources/exports roots.
    pub fn conventional() -> Self {
        Self::from_roots(&resources_root(), &exports_root())
    }

    pub fn from_roots(resources: &Path, exports: &Path) -> Self {
        Self {
            persistent: resources.join("__ReadOnly").join("__ValueDefinitions.csv"),
            candidate_dir: resources.join("ValueDefinitions"),
            export: exports.join("Definitions").join("ValueDefinitions.csv"),
        }
    }
}
