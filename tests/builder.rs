use std::fs;

use caf::{Builder, CafError, IndexEntry};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn rejects_bad_file_names() {
    let mut builder = Builder::new();
    for name in ["", ".", "..", "a/b", "a\nb", "a\0b"] {
        let err = builder.add(name, Vec::new()).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<CafError>(),
                Some(CafError::InvalidName { .. })
            ),
            "{:?} should be rejected",
            name
        );
    }
    // The offending entries were never appended.
    builder.add("ok.txt", b"fine".to_vec()).unwrap();
    let archive = builder.finish();
    assert_eq!(
        archive.index,
        vec![IndexEntry::File {
            name: "ok.txt".to_string(),
        }]
    );
    assert_eq!(archive.files, vec![b"fine".to_vec()]);
}

#[test]
fn rejects_bad_directory_paths() {
    let mut builder = Builder::new();
    for path in ["", "/", "a//b", "/a", "a/", "a/../b", "a/.", "."] {
        let err = builder.change_directory(path).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<CafError>(),
                Some(CafError::InvalidName { .. })
            ),
            "{:?} should be rejected",
            path
        );
    }
    builder.change_directory("a/b/c").unwrap();
    assert_eq!(builder.finish().index.len(), 1);
}

#[test]
fn finish_stamps_the_current_version() {
    assert_eq!(Builder::new().finish().version, 1);
}

#[test]
fn ingest_adds_files_before_subdirectories() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("zeta.txt"), b"z").unwrap();
    fs::write(root.path().join("beta.txt"), b"b").unwrap();
    fs::create_dir(root.path().join("alpha")).unwrap();
    fs::write(root.path().join("alpha/inner.txt"), b"i").unwrap();

    let mut builder = Builder::new();
    builder.ingest_dir(root.path(), None).unwrap();
    let archive = builder.finish();

    assert_eq!(archive.index.len(), 4);
    // Iteration order of the two root files is up to the filesystem, but
    // both must precede the subdirectory marker.
    let mut roots: Vec<&str> = archive.index[..2]
        .iter()
        .map(|entry| match entry {
            IndexEntry::File { name } => name.as_str(),
            IndexEntry::Directory { name } => panic!("unexpected directory {:?}", name),
        })
        .collect();
    roots.sort_unstable();
    assert_eq!(roots, ["beta.txt", "zeta.txt"]);
    assert_eq!(
        archive.index[2],
        IndexEntry::Directory {
            name: "alpha".to_string(),
        }
    );
    assert_eq!(
        archive.index[3],
        IndexEntry::File {
            name: "inner.txt".to_string(),
        }
    );
    assert_eq!(archive.files.len(), 3);
}

#[test]
fn ingest_nests_directory_paths_from_the_prefix() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("outer/inner")).unwrap();
    fs::write(root.path().join("outer/inner/deep.txt"), b"d").unwrap();

    let mut builder = Builder::new();
    builder.ingest_dir(root.path(), Some("top")).unwrap();
    let archive = builder.finish();

    assert_eq!(
        archive.index,
        vec![
            IndexEntry::Directory {
                name: "top".to_string(),
            },
            IndexEntry::Directory {
                name: "top/outer".to_string(),
            },
            IndexEntry::Directory {
                name: "top/outer/inner".to_string(),
            },
            IndexEntry::File {
                name: "deep.txt".to_string(),
            },
        ]
    );
    assert_eq!(archive.files, vec![b"d".to_vec()]);
}
