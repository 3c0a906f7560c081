//! Tests for legacy leaf names
//!
//! Records written before leaf names were base64url-encoded are stored as
//! `_<raw leaf>`. These tests verify:
//! - Legacy records are readable and deletable
//! - Put migrates a legacy record to the canonical name
//! - The canonical record wins when both exist
//! - Listing reports legacy names correctly

use std::fs;
use std::path::{Path, PathBuf};

use filekv::storage::LeafCodec;
use filekv::{Config, Entry, FileBackend};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_backend() -> (TempDir, FileBackend) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().path(temp_dir.path()).build().unwrap();
    (temp_dir, FileBackend::new(config))
}

/// Hand-place a record under the pre-encoding name
fn place_legacy(root: &Path, dirs: &str, leaf: &str, value: &[u8]) -> PathBuf {
    let dir = root.join(dirs);
    fs::create_dir_all(&dir).unwrap();

    let key = if dirs.is_empty() {
        leaf.to_string()
    } else {
        format!("{}/{}", dirs, leaf)
    };
    let path = dir.join(LeafCodec::Raw.file_name(leaf));
    Entry::new(key, value.to_vec())
        .encode_to(fs::File::create(&path).unwrap())
        .unwrap();
    path
}

fn canonical_path(root: &Path, dirs: &str, leaf: &str) -> PathBuf {
    root.join(dirs).join(LeafCodec::Base64Url.file_name(leaf))
}

// =============================================================================
// Read / Delete Tests
// =============================================================================

#[test]
fn test_get_legacy_record() {
    let (temp, backend) = setup_temp_backend();
    place_legacy(temp.path(), "old/style", "token", b"secret");

    let entry = backend.get("old/style/token").unwrap().unwrap();

    assert_eq!(entry.key, "old/style/token");
    assert_eq!(entry.value, &b"secret"[..]);
}

#[test]
fn test_get_go_style_record_with_null_value() {
    let (temp, backend) = setup_temp_backend();
    fs::write(
        temp.path().join("_nil"),
        b"{\"Key\":\"nil\",\"Value\":null}\n",
    )
    .unwrap();

    let entry = backend.get("nil").unwrap().unwrap();

    assert!(entry.value.is_empty());
}

#[test]
fn test_delete_legacy_record_reclaims_directories() {
    let (temp, backend) = setup_temp_backend();
    let legacy = place_legacy(temp.path(), "old/style", "token", b"secret");

    backend.delete("old/style/token").unwrap();

    assert!(!legacy.exists());
    assert!(!temp.path().join("old").exists());
    assert_eq!(backend.get("old/style/token").unwrap(), None);
}

// =============================================================================
// Migration Tests
// =============================================================================

#[test]
fn test_put_migrates_legacy_record() {
    let (temp, backend) = setup_temp_backend();
    let legacy = place_legacy(temp.path(), "dir", "key", b"old");

    backend.put(&Entry::new("dir/key", b"new".to_vec())).unwrap();

    assert!(!legacy.exists());
    assert!(canonical_path(temp.path(), "dir", "key").is_file());
    assert_eq!(fs::read_dir(temp.path().join("dir")).unwrap().count(), 1);
    assert_eq!(backend.get("dir/key").unwrap().unwrap().value, &b"new"[..]);
}

#[test]
fn test_put_migrates_top_level_legacy_record() {
    let (temp, backend) = setup_temp_backend();
    let legacy = place_legacy(temp.path(), "", "top", b"old");

    backend.put(&Entry::new("top", b"new".to_vec())).unwrap();

    assert!(!legacy.exists());
    assert!(canonical_path(temp.path(), "", "top").is_file());
    assert!(temp.path().is_dir());
}

// =============================================================================
// Both Records Present
// =============================================================================

#[test]
fn test_canonical_wins_over_legacy() {
    let (temp, backend) = setup_temp_backend();
    let legacy = place_legacy(temp.path(), "", "dup", b"legacy");
    Entry::new("dup", b"canonical".to_vec())
        .encode_to(fs::File::create(canonical_path(temp.path(), "", "dup")).unwrap())
        .unwrap();

    assert_eq!(backend.get("dup").unwrap().unwrap().value, &b"canonical"[..]);

    // Reads never reconcile; the legacy copy stays until a write
    assert!(legacy.exists());
}

#[test]
fn test_delete_removes_canonical_first() {
    let (temp, backend) = setup_temp_backend();
    let legacy = place_legacy(temp.path(), "", "dup", b"legacy");
    backend.put(&Entry::new("dup", b"canonical".to_vec())).unwrap();
    // Put above already migrated; put the legacy copy back
    place_legacy(temp.path(), "", "dup", b"legacy");

    backend.delete("dup").unwrap();

    assert!(!canonical_path(temp.path(), "", "dup").exists());
    assert!(legacy.exists());
    assert_eq!(backend.get("dup").unwrap().unwrap().value, &b"legacy"[..]);

    backend.delete("dup").unwrap();
    assert_eq!(backend.get("dup").unwrap(), None);
}

#[test]
fn test_put_cleans_up_lingering_legacy_copy() {
    let (temp, backend) = setup_temp_backend();
    backend.put(&Entry::new("dup", b"v1".to_vec())).unwrap();
    let legacy = place_legacy(temp.path(), "", "dup", b"stale");

    backend.put(&Entry::new("dup", b"v2".to_vec())).unwrap();

    assert!(!legacy.exists());
    assert_eq!(backend.get("dup").unwrap().unwrap().value, &b"v2"[..]);
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_list_reports_legacy_names() {
    let (temp, backend) = setup_temp_backend();
    place_legacy(temp.path(), "mixed", "legacy.key", b"1");
    backend.put(&Entry::new("mixed/fresh", b"2".to_vec())).unwrap();

    let mut names = backend.list("mixed").unwrap();
    names.sort();

    assert_eq!(names, vec!["fresh", "legacy.key"]);
}

#[test]
fn test_list_decodes_legacy_name_that_looks_like_base64() {
    let (temp, backend) = setup_temp_backend();
    // "Zm9v" is itself valid base64 for "foo"
    place_legacy(temp.path(), "", "Zm9v", b"1");

    assert_eq!(backend.list("").unwrap(), vec!["foo"]);
}

#[test]
fn test_list_decodes_legacy_name_with_trailing_bits() {
    let (temp, backend) = setup_temp_backend();
    // The final symbol carries bits beyond the decoded byte
    place_legacy(temp.path(), "", "Zh==", b"1");

    assert_eq!(backend.list("").unwrap(), vec!["f"]);
}
