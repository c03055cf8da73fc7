use std::fs;

use caf::{unpack, Archive, Builder, IndexEntry};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn materializes_the_tree() {
    let mut builder = Builder::new();
    builder.add("root.txt", b"at the top".to_vec()).unwrap();
    builder.change_directory("a/b").unwrap();
    builder.add("deep.txt", b"buried".to_vec()).unwrap();
    let archive = builder.finish();

    let dest = TempDir::new().unwrap();
    unpack(&archive, dest.path()).unwrap();

    assert_eq!(fs::read(dest.path().join("root.txt")).unwrap(), b"at the top");
    assert_eq!(fs::read(dest.path().join("a/b/deep.txt")).unwrap(), b"buried");
}

#[test]
fn directory_markers_resolve_from_the_root() {
    let mut builder = Builder::new();
    builder.change_directory("a").unwrap();
    builder.add("one.txt", b"1".to_vec()).unwrap();
    builder.change_directory("b").unwrap();
    builder.add("two.txt", b"2".to_vec()).unwrap();
    let archive = builder.finish();

    let dest = TempDir::new().unwrap();
    unpack(&archive, dest.path()).unwrap();

    // `b` is a sibling of `a`, not nested beneath it.
    assert_eq!(fs::read(dest.path().join("b/two.txt")).unwrap(), b"2");
    assert!(!dest.path().join("a/b").exists());
}

#[test]
fn existing_files_are_skipped_not_overwritten() {
    let mut builder = Builder::new();
    builder.add("kept.txt", b"from the archive".to_vec()).unwrap();
    builder.add("fresh.txt", b"written".to_vec()).unwrap();
    let archive = builder.finish();

    let dest = TempDir::new().unwrap();
    fs::write(dest.path().join("kept.txt"), b"original").unwrap();
    unpack(&archive, dest.path()).unwrap();

    // The clash is skipped, its payload consumed, and later entries still
    // land with their own payloads.
    assert_eq!(fs::read(dest.path().join("kept.txt")).unwrap(), b"original");
    assert_eq!(fs::read(dest.path().join("fresh.txt")).unwrap(), b"written");
}

#[test]
fn duplicate_entries_are_benign() {
    let mut builder = Builder::new();
    builder.change_directory("d").unwrap();
    builder.add("same.txt", b"first".to_vec()).unwrap();
    builder.change_directory("d").unwrap();
    builder.add("same.txt", b"second".to_vec()).unwrap();
    let archive = builder.finish();

    let dest = TempDir::new().unwrap();
    unpack(&archive, dest.path()).unwrap();

    assert_eq!(fs::read(dest.path().join("d/same.txt")).unwrap(), b"first");
}

#[test]
fn file_marker_without_payload_is_an_error() {
    let archive = Archive {
        version: 1,
        index:   vec![IndexEntry::File {
            name: "orphan.txt".to_string(),
        }],
        files:   Vec::new(),
    };
    let dest = TempDir::new().unwrap();
    assert!(unpack(&archive, dest.path()).is_err());
}
