//! End-to-end store/load behavior against real files.

use proptest::prelude::*;
use tempfile::TempDir;

use vmap_model::DataTable;
use vmap_store::{BLOB_VERSION, Salt, StoreError, load, store};

fn fixture_table() -> DataTable {
    let mut table = DataTable::new(vec![
        "CUI".to_string(),
        "value".to_string(),
        "conceptId".to_string(),
    ]);
    table.push_row(vec![
        "EPIC#VA1".to_string(),
        "20/20".to_string(),
        "4011566".to_string(),
    ]);
    table.push_row(vec![
        "EPIC#PU2".to_string(),
        String::new(),
        "437232".to_string(),
    ]);
    table
}

fn salt_in(dir: &TempDir) -> Salt {
    Salt::generate(&dir.path().join("salt.txt")).expect("generate salt")
}

#[test]
fn round_trip_preserves_table_exactly() {
    let dir = TempDir::new().expect("tempdir");
    let salt = salt_in(&dir);
    let path = dir.path().join("values.enc");
    let table = fixture_table();

    store(&table, &path, "correct horse", &salt).expect("store table");
    let loaded = load(&path, "correct horse", &salt).expect("load table");
    assert_eq!(loaded, table);
}

#[test]
fn wrong_password_is_invalid_credential() {
    let dir = TempDir::new().expect("tempdir");
    let salt = salt_in(&dir);
    let path = dir.path().join("values.enc");

    store(&fixture_table(), &path, "correct horse", &salt).expect("store table");
    let error = load(&path, "battery staple", &salt).expect_err("wrong password");
    assert!(matches!(error, StoreError::InvalidCredential));
}

#[test]
fn tampered_blob_is_invalid_credential() {
    let dir = TempDir::new().expect("tempdir");
    let salt = salt_in(&dir);
    let path = dir.path().join("values.enc");

    store(&fixture_table(), &path, "correct horse", &salt).expect("store table");
    let mut blob = std::fs::read(&path).expect("read blob");
    let last = blob.len() - 1;
    blob[last] ^= 0x01;
    std::fs::write(&path, &blob).expect("rewrite blob");

    let error = load(&path, "correct horse", &salt).expect_err("tampered blob");
    assert!(matches!(error, StoreError::InvalidCredential));
}

#[test]
fn unknown_version_byte_is_rejected_before_decrypt() {
    let dir = TempDir::new().expect("tempdir");
    let salt = salt_in(&dir);
    let path = dir.path().join("values.enc");

    store(&fixture_table(), &path, "correct horse", &salt).expect("store table");
    let mut blob = std::fs::read(&path).expect("read blob");
    blob[0] = BLOB_VERSION + 1;
    std::fs::write(&path, &blob).expect("rewrite blob");

    let error = load(&path, "correct horse", &salt).expect_err("future version");
    assert!(matches!(
        error,
        StoreError::UnsupportedVersion(v) if v == BLOB_VERSION + 1
    ));
}

#[test]
fn store_overwrites_existing_blob() {
    let dir = TempDir::new().expect("tempdir");
    let salt = salt_in(&dir);
    let path = dir.path().join("values.enc");

    store(&fixture_table(), &path, "correct horse", &salt).expect("first store");
    let mut updated = fixture_table();
    updated.push_row(vec![
        "EPIC#VA1".to_string(),
        "20/40".to_string(),
        String::new(),
    ]);
    store(&updated, &path, "correct horse", &salt).expect("second store");

    let loaded = load(&path, "correct horse", &salt).expect("load table");
    assert_eq!(loaded, updated);
}

fn cell() -> impl Strategy<Value = String> {
    "[ -~]{0,12}"
}

proptest! {
    // The 390k-iteration KDF makes each case expensive; a handful of cases
    // still exercises the serialization space.
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn round_trip_holds_for_arbitrary_tables(
        columns in prop::collection::vec("[A-Za-z_:]{1,10}", 1..4),
        cells in prop::collection::vec(cell(), 0..12),
        password in "[ -~]{1,16}",
    ) {
        let width = columns.len();
        let mut table = DataTable::new(columns);
        for chunk in cells.chunks(width) {
            if chunk.len() == width {
                table.push_row(chunk.to_vec());
            }
        }

        let dir = TempDir::new().expect("tempdir");
        let salt = salt_in(&dir);
        let path = dir.path().join("values.enc");
        store(&table, &path, &password, &salt).expect("store table");
        let loaded = load(&path, &password, &salt).expect("load table");
        prop_assert_eq!(loaded, table);
    }
}
