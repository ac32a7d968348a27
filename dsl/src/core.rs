//! Common items useful for working with structured text source but not
//! part of the language itself.
use core::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock};

// Static singleton for the empty FileId so that the default value does not
// allocate. Test code in particular creates FileId::default() frequently.
static EMPTY_FILE_ID: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from(""));

/// FileId identifies the origin of source code.
///
/// FileId is normally useful in the context of source positions
/// where a source position is in a file. Standard input is represented
/// by the empty file identifier.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FileId(Arc<str>);

impl FileId {
    /// Creates an empty file identifier.
    pub fn new() -> Self {
        FileId::default()
    }

    /// Creates a file identifier from the path.
    pub fn from_path(path: &Path) -> Self {
        FileId(Arc::from(path.to_string_lossy().as_ref()))
    }

    /// Creates a file identifier from the slice. The slice
    /// is normally the file path.
    pub fn from_string(path: &str) -> Self {
        FileId(Arc::from(path))
    }
}

impl Default for FileId {
    fn default() -> Self {
        FileId(EMPTY_FILE_ID.clone())
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        FileId::from_string(value)
    }
}

/// Location in a file of a language element instance.
///
/// The location is defined by byte indices in the source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceSpan {
    /// The position of the starting character (0-indexed).
    pub start: usize,
    /// The position one past the ending character (0-indexed).
    pub end: usize,
    pub file_id: FileId,
}

impl SourceSpan {
    /// Creates a span for the range of positions with the default file.
    pub fn range(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            file_id: FileId::default(),
        }
    }

    /// Sets the file that the span refers to.
    pub fn with_file_id(mut self, file_id: &FileId) -> Self {
        self.file_id = file_id.clone();
        self
    }
}
