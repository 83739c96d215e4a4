use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
};

/// An entry found by a directory listing such as `files`.
///
/// The entry remembers the location it was listed from, so it keeps pointing
/// at the same file after the program moves elsewhere with `inside`. It prints
/// as the path relative to that location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to `location`, using `/` as separator.
    pub relative: String,
    /// Absolute directory the entry was listed from.
    pub location: PathBuf,
}

impl FileEntry {
    #[must_use]
    pub fn new(relative: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self { relative: relative.into(),
               location: location.into() }
    }

    /// The absolute path of the entry.
    #[must_use]
    pub fn absolute(&self) -> PathBuf {
        self.location.join(Path::new(&self.relative))
    }
}

impl Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative)
    }
}
