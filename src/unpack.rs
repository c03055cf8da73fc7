use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::Path,
};

use anyhow::Result;
use tracing::warn;

use crate::{
    archive::{Archive, IndexEntry},
    error::CafError,
};

/// Materialize `archive` beneath `dest`.
///
/// Directory markers resolve from `dest` itself, never from the previous
/// marker. A file whose target already exists is skipped without being
/// overwritten, its payload still consumed, so duplicate entries are benign
/// but not idempotent. Any other I/O failure aborts the unpack.
pub fn unpack(archive: &Archive, dest: &Path) -> Result<()> {
    let mut current = dest.to_path_buf();
    let mut payloads = archive.files.iter();
    for entry in &archive.index {
        match entry {
            IndexEntry::Directory { name } => {
                let path = dest.join(name);
                fs::create_dir_all(&path)?;
                current = path;
            }
            IndexEntry::File { name } => {
                let data = payloads
                    .next()
                    .ok_or_else(|| CafError::MissingPayload { name: name.clone() })?;
                let target = current.join(name);
                match OpenOptions::new().write(true).create_new(true).open(&target) {
                    Ok(mut file) => file.write_all(data)?,
                    Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                        warn!(path = %target.display(), "target exists, skipping");
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }
    Ok(())
}
