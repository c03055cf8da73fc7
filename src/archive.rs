use std::{fs, io::Write, path::Path};

use anyhow::Result;
use tracing::debug;

use crate::{error::CafError, numeral, octet, scan::Scanner, CAF_MAGIC, CAF_VERSION};

/// One member of the archive index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    /// Sets the directory the following files land under, resolved from the
    /// unpack root rather than from the previous marker
    Directory {
        /// Path relative to the unpack root, `/`-separated
        name: String,
    },
    /// Declares that the next unconsumed payload belongs under the current
    /// directory
    File {
        /// Base name, never containing `/`
        name: String,
    },
}

/// A complete in-memory archive
///
/// The k-th payload in `files` belongs to the k-th `File` marker of a
/// left-to-right walk of `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// Format version the archive was written with
    pub version: u8,
    /// Ordered directory and file markers
    pub index:   Vec<IndexEntry>,
    /// File payloads, aligned with the index's file markers
    pub files:   Vec<Vec<u8>>,
}

impl Archive {
    /// True when `input` starts with the `CAF ` file-type magic
    pub fn sniff(input: &[u8]) -> bool {
        input.starts_with(CAF_MAGIC.as_bytes())
    }

    /// Write the archive to `w`: header, index, then file payloads
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(CAF_MAGIC.as_bytes())?;
        numeral::write_byte(w, self.version)?;
        w.write_all(b"\n")?;
        w.write_all(b"INDEKS ")?;
        numeral::write_u64(w, self.index.len() as u64)?;
        w.write_all(b"\n")?;
        for entry in &self.index {
            let (keyword, name) = match entry {
                IndexEntry::Directory { name } => ("KATALOG ", name),
                IndexEntry::File { name } => ("PLIK ", name),
            };
            w.write_all(keyword.as_bytes())?;
            w.write_all(name.as_bytes())?;
            w.write_all(b"\n")?;
        }
        for file in &self.files {
            w.write_all(b"ROZMIAR ")?;
            numeral::write_u64(w, file.len() as u64)?;
            // The newline ending the size line is the octet codec's leading
            // newline.
            octet::write_payload(w, file)?;
        }
        w.write_all(b"\n")?;
        Ok(())
    }

    /// Parse a complete archive from a fully buffered input
    pub fn read_from(input: &[u8]) -> Result<Archive> {
        let mut s = Scanner::new(input);
        s.expect(CAF_MAGIC)?;
        let version = numeral::read_byte(&mut s);
        s.expect_newline()?;
        if version > CAF_VERSION {
            return Err(CafError::UnsupportedVersion {
                supported: CAF_VERSION,
                found:     version,
            }
            .into());
        }
        s.expect("INDEKS ")?;
        let count = numeral::read_u64(&mut s);
        s.expect_newline()?;
        let mut index = Vec::new();
        let mut file_count = 0;
        for _ in 0..count {
            let offset = s.offset();
            if s.eat("KATALOG ") {
                let name = take_name(&mut s)?;
                validate_dir_path(&name)?;
                index.push(IndexEntry::Directory { name });
            } else if s.eat("PLIK ") {
                let name = take_name(&mut s)?;
                validate_file_name(&name)?;
                file_count += 1;
                index.push(IndexEntry::File { name });
            } else {
                return Err(CafError::UnknownEntryKind { offset }.into());
            }
        }
        let mut files = Vec::with_capacity(file_count);
        for _ in 0..file_count {
            s.expect("ROZMIAR ")?;
            let size = numeral::read_u64(&mut s);
            s.expect_newline()?;
            files.push(octet::read_payload(&mut s, size)?);
        }
        // The closing newline is expected but tolerated when absent.
        s.eat("\n");
        Ok(Archive {
            version,
            index,
            files,
        })
    }
}

/// Accumulates directory markers and file payloads in order, yielding a
/// well-formed archive
#[derive(Debug, Default)]
pub struct Builder {
    index: Vec<IndexEntry>,
    files: Vec<Vec<u8>>,
}

impl Builder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory marker; the following files land under `path`
    pub fn change_directory(&mut self, path: &str) -> Result<()> {
        validate_dir_path(path)?;
        self.index.push(IndexEntry::Directory {
            name: path.to_string(),
        });
        Ok(())
    }

    /// Append a file marker and its payload
    pub fn add(&mut self, name: &str, data: Vec<u8>) -> Result<()> {
        validate_file_name(name)?;
        self.index.push(IndexEntry::File {
            name: name.to_string(),
        });
        self.files.push(data);
        Ok(())
    }

    /// Ingest a directory tree rooted at `dir`, prefixing every entry with
    /// `prefix` when given.
    ///
    /// Within one directory all files are added before any subdirectory is
    /// descended into; children that are neither files nor directories are
    /// ignored. Iteration order within each group is whatever the filesystem
    /// yields.
    pub fn ingest_dir(&mut self, dir: &Path, prefix: Option<&str>) -> Result<()> {
        if let Some(prefix) = prefix {
            self.change_directory(prefix)?;
        }
        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let kind = entry.file_type()?;
            if kind.is_file() {
                files.push(entry);
            } else if kind.is_dir() {
                subdirs.push(entry);
            }
        }
        for entry in files {
            let name = entry
                .file_name()
                .into_string()
                .map_err(|_| CafError::StringConversion)?;
            let data = fs::read(entry.path())?;
            debug!(file = %entry.path().display(), bytes = data.len(), "adding file");
            self.add(&name, data)?;
        }
        for entry in subdirs {
            let name = entry
                .file_name()
                .into_string()
                .map_err(|_| CafError::StringConversion)?;
            let path = match prefix {
                Some(prefix) => format!("{}/{}", prefix, name),
                None => name,
            };
            self.ingest_dir(&entry.path(), Some(&path))?;
        }
        Ok(())
    }

    /// Transfer the accumulated index and payloads into a finished archive
    pub fn finish(self) -> Archive {
        Archive {
            version: CAF_VERSION,
            index:   self.index,
            files:   self.files,
        }
    }
}

fn take_name(s: &mut Scanner) -> Result<String, CafError> {
    let offset = s.offset();
    let raw = s.take_line()?;
    String::from_utf8(raw.to_vec()).map_err(|_| CafError::NameEncoding { offset })
}

/// A file name: non-empty, no `/`, no NUL, no line break, not `.` or `..`
fn validate_file_name(name: &str) -> Result<(), CafError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.chars().any(|c| c == '/' || c == '\0' || c == '\n')
    {
        return Err(CafError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A directory path: one or more `/`-separated components, each one a valid
/// file name
fn validate_dir_path(path: &str) -> Result<(), CafError> {
    if path.is_empty() || path.split('/').any(|part| validate_file_name(part).is_err()) {
        return Err(CafError::InvalidName {
            name: path.to_string(),
        });
    }
    Ok(())
}
