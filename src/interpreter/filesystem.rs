use std::{
    fs, io,
    path::{Component, Path, PathBuf},
    time::SystemTime,
};

use walkdir::WalkDir;

use crate::{
    interpreter::value::{core::Value, file::FileEntry, number::Number, time::Time},
    util::num::{u64_to_i64, usize_to_i64},
};

/// Characters that cannot appear in a path written in a program.
const FORBIDDEN_PATH_CHARACTERS: &[char] = &['<', '>', '"', '|', '?', '*', '\0'];

/// A property of a file or directory, readable as a bare name inside a block
/// (`files { size }`) or as a function (`size('a.txt')`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Access,
    Change,
    Creation,
    Depth,
    Empty,
    Exists,
    Extension,
    Fullname,
    Hidden,
    IsDirectory,
    IsFile,
    Modification,
    Name,
    Parent,
    Path,
    Readonly,
    Size,
}

impl Attribute {
    /// Looks up an attribute by name, ignoring case.
    ///
    /// # Example
    /// ```
    /// use uro::interpreter::filesystem::Attribute;
    ///
    /// assert_eq!(Attribute::from_name("isDirectory"), Some(Attribute::IsDirectory));
    /// assert_eq!(Attribute::from_name("colour"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "access" => Some(Self::Access),
            "change" => Some(Self::Change),
            "creation" => Some(Self::Creation),
            "depth" => Some(Self::Depth),
            "empty" => Some(Self::Empty),
            "exists" => Some(Self::Exists),
            "extension" => Some(Self::Extension),
            "fullname" => Some(Self::Fullname),
            "hidden" => Some(Self::Hidden),
            "isdirectory" => Some(Self::IsDirectory),
            "isfile" => Some(Self::IsFile),
            "modification" => Some(Self::Modification),
            "name" => Some(Self::Name),
            "parent" => Some(Self::Parent),
            "path" => Some(Self::Path),
            "readonly" => Some(Self::Readonly),
            "size" => Some(Self::Size),
            _ => None,
        }
    }

    /// The value every attribute takes for an empty or malformed path.
    fn degraded(self) -> Value {
        match self {
            Self::Depth | Self::Size => Value::from(0),
            Self::Empty | Self::Exists | Self::Hidden | Self::IsDirectory | Self::IsFile
            | Self::Readonly => Value::Bool(false),
            Self::Access
            | Self::Change
            | Self::Creation
            | Self::Modification
            | Self::Extension
            | Self::Fullname
            | Self::Name
            | Self::Parent
            | Self::Path => Value::Str(String::new()),
        }
    }
}

/// Which entries a listing keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Files,
    Directories,
}

/// Removes `.` and `..` components without touching the filesystem.
///
/// # Example
/// ```
/// use std::path::Path;
///
/// use uro::interpreter::filesystem::normalize;
///
/// assert_eq!(normalize(Path::new("/a/./b/../c")), Path::new("/a/c"));
/// assert_eq!(normalize(Path::new("/..")), Path::new("/"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
                if normalized.as_os_str().is_empty() {
                    normalized.push(Component::RootDir);
                }
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Text form of a path, as printed by programs.
#[must_use]
pub fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Whether `text` can name a file: not empty and free of wildcard and
/// redirection characters.
#[must_use]
pub fn is_valid_path(text: &str) -> bool {
    !text.trim().is_empty() && !text.contains(FORBIDDEN_PATH_CHARACTERS)
}

/// The entry a value refers to.
///
/// File entries refer to themselves; strings name a path relative to
/// `location`. Returns `None` for malformed paths and for values that are not
/// text.
#[must_use]
pub fn entry_of(value: &Value, location: &Path) -> Option<FileEntry> {
    match value {
        Value::File(entry) => Some(entry.as_ref().clone()),
        Value::Str(text) if is_valid_path(text) => Some(FileEntry::new(text.as_str(), location)),
        _ => None,
    }
}

/// Whether the final component of `path` has an extension. Paths that do not
/// exist are taken to be files when they do and directories otherwise.
#[must_use]
pub fn has_extension(path: &Path) -> bool {
    path.extension().is_some()
}

/// Lists the files or directories below `location`, sorted by name.
///
/// Without `recursive` only direct children are listed; otherwise the whole
/// tree is walked depth first. Unreadable entries are skipped.
#[must_use]
pub fn list(location: &Path, kind: EntryKind, recursive: bool) -> Vec<FileEntry> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(location).min_depth(1)
                          .max_depth(max_depth)
                          .sort_by_file_name()
                          .into_iter()
                          .filter_map(Result::ok)
                          .filter(|entry| match kind {
                              EntryKind::Files => entry.file_type().is_file(),
                              EntryKind::Directories => entry.file_type().is_dir(),
                          })
                          .filter_map(|entry| {
                              let relative = entry.path().strip_prefix(location).ok()?;
                              Some(FileEntry::new(relative_text(relative), location))
                          })
                          .collect()
}

fn relative_text(relative: &Path) -> String {
    relative.components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
}

/// Total size in bytes of the files below a directory.
#[must_use]
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path).min_depth(1)
                      .into_iter()
                      .filter_map(Result::ok)
                      .filter(|entry| entry.file_type().is_file())
                      .filter_map(|entry| entry.metadata().ok())
                      .map(|metadata| metadata.len())
                      .sum()
}

/// Reads an attribute of an entry.
///
/// `None` stands for an empty or malformed path; every attribute then takes
/// its zero value.
#[must_use]
pub fn attribute(entry: Option<&FileEntry>, attribute: Attribute) -> Value {
    let Some(entry) = entry else {
        return attribute.degraded();
    };

    let path = normalize(&entry.absolute());
    let metadata = fs::metadata(&path).ok();
    let is_directory = metadata.as_ref()
                               .map_or_else(|| !has_extension(&path), fs::Metadata::is_dir);
    let is_file = metadata.as_ref()
                          .map_or_else(|| has_extension(&path), fs::Metadata::is_file);
    let file_name = path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();

    match attribute {
        Attribute::Exists => Value::Bool(metadata.is_some()),
        Attribute::IsDirectory => Value::Bool(is_directory),
        Attribute::IsFile => Value::Bool(is_file),
        Attribute::Fullname => Value::Str(file_name),
        Attribute::Name => {
            if is_directory {
                Value::Str(file_name)
            } else {
                Value::Str(path.file_stem()
                               .map(|s| s.to_string_lossy().into_owned())
                               .unwrap_or_default())
            }
        },
        Attribute::Extension => {
            let extension = path.extension()
                                .filter(|_| is_file)
                                .map(|e| e.to_string_lossy().to_lowercase());
            Value::Str(extension.unwrap_or_default())
        },
        Attribute::Parent => Value::Str(path.parent().map(display).unwrap_or_default()),
        Attribute::Path => Value::Str(display(&path)),
        Attribute::Hidden => Value::Bool(file_name.starts_with('.')),
        Attribute::Readonly => {
            Value::Bool(metadata.as_ref()
                                .is_some_and(|m| m.permissions().readonly()))
        },
        Attribute::Depth => {
            let components = Path::new(&entry.relative).components()
                                                       .filter(|c| {
                                                           matches!(c, Component::Normal(_))
                                                       })
                                                       .count();
            Value::from(usize_to_i64(components.saturating_sub(1)))
        },
        Attribute::Size => {
            let bytes = match &metadata {
                Some(m) if m.is_dir() => directory_size(&path),
                Some(m) => m.len(),
                None => 0,
            };
            Value::Number(Number::Integer(u64_to_i64(bytes)))
        },
        Attribute::Empty => {
            let empty = match &metadata {
                Some(m) if m.is_dir() => {
                    fs::read_dir(&path).is_ok_and(|mut entries| entries.next().is_none())
                },
                Some(m) => m.len() == 0,
                None => false,
            };
            Value::Bool(empty)
        },
        Attribute::Access => timestamp(metadata.as_ref(), fs::Metadata::accessed),
        Attribute::Creation => timestamp(metadata.as_ref(), fs::Metadata::created),
        Attribute::Modification | Attribute::Change => {
            timestamp(metadata.as_ref(), fs::Metadata::modified)
        },
    }
}

fn timestamp(metadata: Option<&fs::Metadata>,
             read: fn(&fs::Metadata) -> io::Result<SystemTime>)
             -> Value {
    metadata.and_then(|m| read(m).ok())
            .map_or_else(|| Value::Str(String::new()),
                         |time| Value::Time(Time::from_system_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_paths_degrade_to_zero_values() {
        let location = Path::new("/");
        assert_eq!(entry_of(&Value::from(""), location), None);
        assert_eq!(entry_of(&Value::from("?/?"), location), None);
        assert_eq!(attribute(None, Attribute::Exists), Value::Bool(false));
        assert_eq!(attribute(None, Attribute::Size), Value::from(0));
        assert_eq!(attribute(None, Attribute::Path), Value::from(""));
    }

    #[test]
    fn missing_entries_guess_their_kind_from_the_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileEntry::new("missing.txt", dir.path());
        let folder = FileEntry::new("missing", dir.path());

        assert_eq!(attribute(Some(&file), Attribute::IsFile), Value::Bool(true));
        assert_eq!(attribute(Some(&file), Attribute::IsDirectory), Value::Bool(false));
        assert_eq!(attribute(Some(&folder), Attribute::IsDirectory), Value::Bool(true));
        assert_eq!(attribute(Some(&folder), Attribute::Exists), Value::Bool(false));
    }

    #[test]
    fn listings_are_sorted_and_relative() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "bb").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("sub").join("c.txt"), "ccc").unwrap();

        let names = |entries: Vec<FileEntry>| {
            entries.into_iter().map(|e| e.relative).collect::<Vec<_>>()
        };
        assert_eq!(names(list(dir.path(), EntryKind::Files, false)), ["a.txt", "b.txt"]);
        assert_eq!(names(list(dir.path(), EntryKind::Files, true)),
                   ["a.txt", "b.txt", "sub/c.txt"]);
        assert_eq!(names(list(dir.path(), EntryKind::Directories, false)), ["sub"]);
        assert_eq!(directory_size(dir.path()), 6);
    }

    #[test]
    fn names_depend_on_the_entry_kind() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("photos.2020")).unwrap();
        let folder = FileEntry::new("photos.2020", dir.path());
        let file = FileEntry::new("notes.TXT", dir.path());

        assert_eq!(attribute(Some(&folder), Attribute::Name), Value::from("photos.2020"));
        assert_eq!(attribute(Some(&folder), Attribute::Extension), Value::from(""));
        assert_eq!(attribute(Some(&file), Attribute::Name), Value::from("notes"));
        assert_eq!(attribute(Some(&file), Attribute::Extension), Value::from("txt"));
    }
}
