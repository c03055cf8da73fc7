use thiserror::Error;

/// An error enum for return from archive methods that may fail
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CafError {
    /// Cannot convert a string to/from unicode
    #[error("String conversion Error")]
    StringConversion,
    /// A required literal keyword was not found in the input
    #[error("Expected {keyword:?} at byte {offset}")]
    ExpectedKeyword {
        /// The keyword the grammar required
        keyword: &'static str,
        /// Byte offset of the cursor when the match failed
        offset:  usize,
    },
    /// A required line break was not found in the input
    #[error("Expected end of line at byte {offset}")]
    ExpectedNewline {
        /// Byte offset of the cursor when the match failed
        offset: usize,
    },
    /// An index entry matched neither `KATALOG ` nor `PLIK `
    #[error("Index entry at byte {offset} is neither KATALOG nor PLIK")]
    UnknownEntryKind {
        /// Byte offset of the offending entry line
        offset: usize,
    },
    /// Reading an archive written by a newer version of the format
    #[error("Unsupported version (newest supported {supported:?}, got {found:?})")]
    #[allow(missing_docs)]
    UnsupportedVersion { supported: u8, found: u8 },
    /// An octet line does not begin with a numeral
    #[error("Expected a numeral at byte {offset}")]
    ExpectedNumeral {
        /// Byte offset where a numeral should start
        offset: usize,
    },
    /// An octet run overshoots the declared payload size
    #[error("Octet stream at byte {offset} overruns the declared size of {declared}")]
    PayloadOverrun {
        /// Byte offset of the overshooting octet line
        offset:   usize,
        /// Payload size declared by the ROZMIAR line
        declared: u64,
    },
    /// An entry name on the wire is not valid UTF-8
    #[error("Entry name at byte {offset} is not valid UTF-8")]
    NameEncoding {
        /// Byte offset of the start of the name
        offset: usize,
    },
    /// An entry name breaks the naming rules
    #[error("Invalid entry name {name:?}")]
    InvalidName {
        /// The rejected name
        name: String,
    },
    /// An index file entry has no corresponding payload
    #[error("File entry {name:?} has no payload")]
    MissingPayload {
        /// Name of the orphaned file entry
        name: String,
    },
}
