//! Append-only registry update.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::info;

use vmap_ingest::load_candidate_pairs;
use vmap_model::{DefinitionRecord, ValuePair};

use crate::error::{RegistryError, Result};
use crate::lock::{WriteUnlock, protect};
use crate::paths::RegistryPaths;
use crate::table::{load_definitions, write_definitions};

/// What a refresh did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub files_scanned: usize,
    pub candidate_pairs: usize,
    pub appended: usize,
    /// Inclusive ID range of the appended records, when any were added.
    pub id_range: Option<(u64, u64)>,
}

/// The append-only value-definition registry.
pub struct Registry {
    paths: RegistryPaths,
}

impl Registry {
    pub fn new(paths: RegistryPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &RegistryPaths {
        &self.paths
    }

    /// Create an empty, protected definition table plus the candidate
    /// directory. Refuses to touch an existing table.
    pub fn initialize(&self) -> Result<()> {
        if self.paths.persistent.exists() {
            return Err(RegistryError::AlreadyInitialized {
                path: self.paths.persistent.clone(),
            });
        }
        if let Some(parent) = self.paths.persistent.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RegistryError::io(parent, e))?;
        }
        std::fs::create_dir_all(&self.paths.candidate_dir)
            .map_err(|e| RegistryError::io(&self.paths.candidate_dir, e))?;
        write_definitions(&self.paths.persistent, &[])?;
        protect(&self.paths.persistent)?;
        info!(path = %self.paths.persistent.display(), "initialized definition table");
        Ok(())
    }

    /// Load the current persisted records.
    pub fn records(&self) -> Result<Vec<DefinitionRecord>> {
        load_definitions(&self.paths.persistent)
    }

    /// Scan the candidate directory and append every (CUI, value) pair not
    /// already present for its CUI.
    ///
    /// Existing records are never altered: before anything is written, every
    /// pre-existing record is re-read by its original ID from the updated
    /// table and compared against its pre-update value. The persisted file
    /// is read-only protected again on every exit path, success or failure.
    pub fn refresh(&self, today: NaiveDate) -> Result<RefreshOutcome> {
        let persisted = load_definitions(&self.paths.persistent)?;

        let mut known: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for record in &persisted {
            known
                .entry(record.cui.as_str())
                .or_default()
                .insert(record.value.as_str());
        }

        info!(directory = %self.paths.candidate_dir.display(), "scanning value definition files");
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(&self.paths.candidate_dir)
            .map_err(|e| RegistryError::io(&self.paths.candidate_dir, e))?
        {
            let entry = entry.map_err(|e| RegistryError::io(&self.paths.candidate_dir, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut fresh: Vec<ValuePair> = Vec::new();
        let mut seen: BTreeSet<ValuePair> = BTreeSet::new();
        let mut candidate_pairs = 0usize;
        for file in &files {
            let pairs = load_candidate_pairs(file)?;
            candidate_pairs += pairs.len();
            for pair in pairs {
                let already_defined = known
                    .get(pair.cui.as_str())
                    .is_some_and(|values| values.contains(pair.value.as_str()));
                if already_defined || seen.contains(&pair) {
                    continue;
                }
                seen.insert(pair.clone());
                fresh.push(pair);
            }
        }
        info!(
            files = files.len(),
            pairs = candidate_pairs,
            new = fresh.len(),
            "scanned candidate files"
        );

        let prev_len = persisted.len();
        let mut updated = persisted.clone();
        for (offset, pair) in fresh.iter().enumerate() {
            updated.push(DefinitionRecord {
                id: (prev_len + offset) as u64,
                cui: pair.cui.clone(),
                value: pair.value.clone(),
                valid: true,
                creation_date: today,
                invalid_date: None,
            });
        }
        verify_existing_unchanged(&persisted, &updated)?;

        let outcome = RefreshOutcome {
            files_scanned: files.len(),
            candidate_pairs,
            appended: fresh.len(),
            id_range: if fresh.is_empty() {
                None
            } else {
                Some((prev_len as u64, (updated.len() - 1) as u64))
            },
        };

        if fresh.is_empty() {
            info!("no new value definitions found");
            // The table was not touched, but a prior failed run may have
            // left it writable.
            protect(&self.paths.persistent)?;
            return Ok(outcome);
        }

        self.commit(&updated)?;
        let (first, last) = outcome.id_range.unwrap_or_default();
        info!(first, last, "appended new value definitions");
        Ok(outcome)
    }

    /// Flag existing records as invalid, stamping today as the invalidation
    /// date. IDs must be distinct, present, and still valid; the first
    /// invalidation date of a record is immutable.
    pub fn set_invalid(&self, ids: &[u64], today: NaiveDate) -> Result<usize> {
        let mut requested = BTreeSet::new();
        for &id in ids {
            if !requested.insert(id) {
                return Err(RegistryError::DuplicateId(id));
            }
        }

        let mut records = load_definitions(&self.paths.persistent)?;
        if ids.is_empty() {
            protect(&self.paths.persistent)?;
            return Ok(0);
        }
        for &id in ids {
            let record = records
                .get_mut(id as usize)
                .ok_or(RegistryError::UnknownId(id))?;
            if !record.valid {
                return Err(RegistryError::AlreadyInvalid(id));
            }
            record.valid = false;
            record.invalid_date = Some(today);
        }

        let unlock = WriteUnlock::new(&self.paths.persistent)?;
        write_definitions(&self.paths.persistent, &records)?;
        unlock.relock()?;
        info!(count = ids.len(), "marked definition records invalid");
        Ok(ids.len())
    }

    /// Protected rewrite of the persisted table, then the downstream export.
    fn commit(&self, records: &[DefinitionRecord]) -> Result<()> {
        let unlock = WriteUnlock::new(&self.paths.persistent)?;
        write_definitions(&self.paths.persistent, records)?;
        unlock.relock()?;
        info!(path = %self.paths.persistent.display(), "updated definition table");

        if let Some(parent) = self.paths.export.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RegistryError::io(parent, e))?;
        }
        write_definitions(&self.paths.export, records)?;
        Ok(())
    }
}

fn verify_existing_unchanged(
    before: &[DefinitionRecord],
    after: &[DefinitionRecord],
) -> Result<()> {
    if after.len() < before.len() {
        return Err(RegistryError::integrity(
            "records were dropped during append",
        ));
    }
    for (position, previous) in before.iter().enumerate() {
        if &after[position] != previous {
            return Err(RegistryError::integrity(format!(
                "record {} changed during append",
                previous.id
            )));
        }
    }
    Ok(())
}
