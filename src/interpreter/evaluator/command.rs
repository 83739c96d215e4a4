use std::{
    ffi::OsString,
    fs::{self, File, FileTimes},
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    ast::{Expr, OnConflict, Verb},
    interpreter::{
        evaluator::core::{Context, EvalResult, Scope},
        filesystem::{self, has_extension, normalize},
        value::{
            file::FileEntry,
            time::{Precision, Time},
        },
    },
};

/// The unevaluated parts of a command statement around its keyword.
pub(crate) struct CommandOperands<'a> {
    /// The changed entries; `this` when absent.
    pub target:      Option<&'a Expr>,
    /// What follows `to`.
    pub destination: Option<&'a Expr>,
    /// What follows `as`.
    pub new_name:    Option<&'a Expr>,
    pub conflict:    OnConflict,
}

/// What follows `to` in a command, checked before any entry is touched.
enum Destination {
    Nothing,
    Time(Time),
    Path(String),
}

/// A command with its operands evaluated, ready to run on each entry.
struct Prepared {
    verb:        Verb,
    destination: Destination,
    new_name:    Option<String>,
    conflict:    OnConflict,
}

impl Context<'_> {
    /// Executes a filesystem command.
    ///
    /// The target defaults to `this`. A collection target runs the command
    /// once per element. Every element prints exactly one line: the
    /// confirmation, or `Failed to <verb> '<name>'` when the operating system
    /// refuses. `success` records the outcome of the last element.
    ///
    /// # Errors
    /// Only for a malformed command: a missing `this`, or a destination or
    /// new name of the wrong type. Filesystem failures are reported, not
    /// raised.
    pub(crate) fn exec_command(&mut self,
                               verb: Verb,
                               operands: &CommandOperands<'_>,
                               scope: &Scope,
                               line: usize)
                               -> EvalResult<()> {
        let target = match operands.target {
            Some(expr) => self.eval(expr, scope)?,
            None => self.this_value(scope, line)?,
        };
        let destination = match operands.destination {
            None => Destination::Nothing,
            Some(expr) => {
                let value = self.eval(expr, scope)?;
                match verb {
                    Verb::Recreate | Verb::Reaccess | Verb::Remodify | Verb::Rechange => {
                        Destination::Time(value.as_time(line)?)
                    },
                    _ => Destination::Path(value.as_text(line)?),
                }
            },
        };
        let new_name = match operands.new_name {
            Some(expr) => Some(self.eval(expr, scope)?.as_text(line)?.trim().to_string()),
            None => None,
        };
        let command = Prepared { verb,
                                 destination,
                                 new_name,
                                 conflict: operands.conflict };

        for element in target.into_elements() {
            let outcome = match filesystem::entry_of(&element, &scope.location) {
                Some(entry) => command.perform(&entry, &scope.location),
                None => Err(io::Error::new(io::ErrorKind::InvalidInput, "not a valid path")),
            };

            self.success = outcome.is_ok();
            let report = match outcome {
                Ok(report) => {
                    debug!(verb = verb.keyword(), target = %element, conflict = ?command.conflict,
                           "command succeeded");
                    report
                },
                Err(e) => {
                    warn!(verb = verb.keyword(), target = %element, error = %e, "command failed");
                    format!("Failed to {} '{element}'", verb.action())
                },
            };
            self.report(&report)?;
        }
        Ok(())
    }
}

impl Prepared {
    /// Carries out the command on one entry and returns its confirmation
    /// line.
    fn perform(&self, entry: &FileEntry, location: &Path) -> io::Result<String> {
        let path = normalize(&entry.absolute());
        let name = &entry.relative;
        let verb = self.verb;

        match (verb, &self.destination) {
            (Verb::Create | Verb::CreateFile | Verb::CreateDirectory, _) => {
                let as_file = match verb {
                    Verb::CreateFile => true,
                    Verb::CreateDirectory => false,
                    _ => has_extension(&path),
                };
                let path = claim(path, self.conflict, as_file)?;
                let shown = shown_name(name, &path);
                if as_file {
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    File::create_new(&path)?;
                    Ok(format!("Create file '{shown}'"))
                } else {
                    fs::create_dir_all(&path)?;
                    Ok(format!("Create directory '{shown}'"))
                }
            },
            (Verb::Delete | Verb::Drop, _) => {
                remove(&path)?;
                Ok(format!("{} '{name}'", verb.title()))
            },
            (Verb::Hide | Verb::Unhide, _) => {
                set_hidden(&path, verb == Verb::Hide)?;
                Ok(format!("{} '{name}'", verb.title()))
            },
            (Verb::Lock | Verb::Unlock, _) => {
                set_locked(&path, verb == Verb::Lock)?;
                Ok(format!("{} '{name}'", verb.title()))
            },
            (Verb::Recreate | Verb::Reaccess | Verb::Remodify | Verb::Rechange,
             Destination::Time(time)) => {
                let applied = retime(verb, &path, *time)?;
                Ok(format!("{} '{name}' to {applied}", verb.title()))
            },
            (Verb::Rename, Destination::Path(new_name)) => {
                if !is_plain_name(new_name) {
                    return Err(io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"));
                }
                if !exists(&path) {
                    return Err(not_found(&path));
                }
                let parent = path.parent().ok_or_else(|| not_found(&path))?;
                let renamed = claim(parent.join(new_name), self.conflict, path.is_file())?;
                fs::rename(&path, &renamed)?;
                Ok(format!("Rename '{name}' to '{}'", file_name_of(&renamed)))
            },
            (Verb::Move | Verb::Copy, Destination::Path(directory)) => {
                self.relocate(&path, name, directory, location)
            },
            _ => Err(io::Error::new(io::ErrorKind::InvalidInput, "missing destination")),
        }
    }

    /// Moves or copies an entry into `directory`, creating the directory
    /// when needed.
    ///
    /// A file keeps its extension when the name given with `as` has none.
    fn relocate(&self,
                path: &Path,
                name: &str,
                directory: &str,
                location: &Path)
                -> io::Result<String> {
        if !exists(path) {
            return Err(not_found(path));
        }
        let is_file = path.is_file();
        let file_name = match &self.new_name {
            Some(new_name) => {
                if !is_plain_name(new_name) {
                    return Err(io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"));
                }
                let mut file_name = OsString::from(new_name);
                if is_file
                   && !has_extension(Path::new(new_name))
                   && let Some(extension) = path.extension()
                {
                    file_name.push(".");
                    file_name.push(extension);
                }
                file_name
            },
            None => path.file_name().ok_or_else(|| not_found(path))?.to_os_string(),
        };

        let directory_path = normalize(&location.join(directory));
        let placed = directory_path.join(&file_name);
        if placed == path && self.conflict != OnConflict::Stack {
            return Err(already_exists(&placed));
        }

        fs::create_dir_all(&directory_path)?;
        let placed = claim(placed, self.conflict, is_file)?;
        if self.verb == Verb::Move {
            fs::rename(path, &placed)?;
        } else {
            copy(path, &placed)?;
        }

        let placed_name = file_name_of(&placed);
        if self.new_name.is_some() || placed.file_name() != path.file_name() {
            Ok(format!("{} '{name}' to '{directory}' as '{placed_name}'", self.verb.title()))
        } else {
            Ok(format!("{} '{name}' to '{directory}'", self.verb.title()))
        }
    }
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn already_exists(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::AlreadyExists, path.display().to_string())
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, path.display().to_string())
}

fn remove(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// A name that stays inside its parent directory.
fn is_plain_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".." && filesystem::is_valid_path(name)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The name a command was given, with its last component replaced by the
/// final component of `path`.
fn shown_name(name: &str, path: &Path) -> String {
    match path.file_name() {
        Some(file_name) if Path::new(name).file_name() != Some(file_name) => {
            Path::new(name).with_file_name(file_name).display().to_string()
        },
        _ => name.to_string(),
    }
}

/// Returns the path a new entry is placed at.
///
/// A free `path` is returned unchanged. An occupied one fails with
/// [`OnConflict::Refuse`], is removed with [`OnConflict::Overwrite`] and is
/// replaced by [`stacked`] with [`OnConflict::Stack`].
fn claim(path: PathBuf, conflict: OnConflict, keep_extension: bool) -> io::Result<PathBuf> {
    if !exists(&path) {
        return Ok(path);
    }
    match conflict {
        OnConflict::Refuse => Err(already_exists(&path)),
        OnConflict::Overwrite => {
            remove(&path)?;
            Ok(path)
        },
        OnConflict::Stack => stacked(&path, keep_extension).ok_or_else(|| already_exists(&path)),
    }
}

/// The first free sibling of `path` named `name(2)`, `name(3)` and so on.
///
/// With `keep_extension` the counter goes before the extension, as in
/// `notes(2).txt`.
fn stacked(path: &Path, keep_extension: bool) -> Option<PathBuf> {
    let extension = path.extension().filter(|_| keep_extension);
    let base = if extension.is_some() {
        path.file_stem()?
    } else {
        path.file_name()?
    };

    (2..=u32::MAX).map(|n| {
                       let mut file_name = base.to_os_string();
                       file_name.push(format!("({n})"));
                       if let Some(extension) = extension {
                           file_name.push(".");
                           file_name.push(extension);
                       }
                       path.with_file_name(file_name)
                   })
                   .find(|candidate| !exists(candidate))
}

/// Hides an entry by giving its name a leading dot, or unhides it by
/// removing the leading dots. An entry already in the wanted state is left
/// alone.
fn set_hidden(path: &Path, hidden: bool) -> io::Result<()> {
    if !exists(path) {
        return Err(not_found(path));
    }
    let file_name = file_name_of(path);
    if file_name.starts_with('.') == hidden {
        return Ok(());
    }

    let new_name = if hidden {
        format!(".{file_name}")
    } else {
        file_name.trim_start_matches('.').to_string()
    };
    if new_name.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"));
    }
    let renamed = path.with_file_name(new_name);
    if exists(&renamed) {
        return Err(already_exists(&renamed));
    }
    fs::rename(path, renamed)
}

/// Makes an entry read-only, or writable again for its owner.
#[cfg(unix)]
fn set_locked(path: &Path, locked: bool) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    let mode = permissions.mode();
    permissions.set_mode(if locked { mode & !0o222 } else { mode | 0o200 });
    fs::set_permissions(path, permissions)
}

/// Makes an entry read-only, or writable again.
#[cfg(not(unix))]
fn set_locked(path: &Path, locked: bool) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(locked);
    fs::set_permissions(path, permissions)
}

fn copy(from: &Path, to: &Path) -> io::Result<()> {
    if !from.is_dir() {
        return fs::copy(from, to).map(|_| ());
    }

    for entry in WalkDir::new(from) {
        let entry = entry?;
        let relative = entry.path()
                            .strip_prefix(from)
                            .map_err(io::Error::other)?;
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Sets one timestamp of an entry and returns the time actually applied.
///
/// A time without a clock keeps the clock of the current timestamp.
fn retime(verb: Verb, path: &Path, time: Time) -> io::Result<Time> {
    let metadata = fs::metadata(path)?;
    let current = match verb {
        Verb::Recreate => metadata.created(),
        Verb::Reaccess => metadata.accessed(),
        _ => metadata.modified(),
    }?;

    let applied = if time.precision() <= Precision::Date {
        time.at_clock_of(Time::from_system_time(current))
    } else {
        time
    };
    let instant = applied.to_system_time()
                         .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput,
                                                       "time does not exist locally"))?;

    let times = FileTimes::new();
    let times = match verb {
        Verb::Recreate => with_created(times, instant)?,
        Verb::Reaccess => times.set_accessed(instant),
        _ => times.set_modified(instant),
    };
    File::open(path)?.set_times(times)?;
    Ok(applied)
}

#[cfg(any(windows, target_os = "macos"))]
fn with_created(times: FileTimes, instant: std::time::SystemTime) -> io::Result<FileTimes> {
    #[cfg(target_os = "macos")]
    use std::os::macos::fs::FileTimesExt;
    #[cfg(windows)]
    use std::os::windows::fs::FileTimesExt;

    Ok(times.set_created(instant))
}

#[cfg(not(any(windows, target_os = "macos")))]
fn with_created(_times: FileTimes, _instant: std::time::SystemTime) -> io::Result<FileTimes> {
    Err(io::Error::new(io::ErrorKind::Unsupported,
                       "creation time cannot be changed on this platform"))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn stacked_names_count_up_before_the_extension() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "").unwrap();
        assert_eq!(stacked(&notes, true), Some(dir.path().join("notes(2).txt")));

        fs::write(dir.path().join("notes(2).txt"), "").unwrap();
        assert_eq!(stacked(&notes, true), Some(dir.path().join("notes(3).txt")));
        assert_eq!(stacked(&notes, false), Some(dir.path().join("notes.txt(2)")));
    }

    #[test]
    fn claim_follows_the_conflict_mode() {
        let dir = TempDir::new().unwrap();
        let taken = dir.path().join("taken");
        fs::create_dir(&taken).unwrap();

        assert!(claim(taken.clone(), OnConflict::Refuse, false).is_err());
        assert_eq!(claim(taken.clone(), OnConflict::Stack, false).unwrap(),
                   dir.path().join("taken(2)"));
        assert_eq!(claim(taken.clone(), OnConflict::Overwrite, false).unwrap(), taken);
        assert!(!taken.exists());
    }

    #[test]
    fn shown_names_keep_the_written_directory() {
        assert_eq!(shown_name("docs/a.txt", Path::new("/x/docs/a(2).txt")), "docs/a(2).txt");
        assert_eq!(shown_name("a.txt", Path::new("/x/a.txt")), "a.txt");
    }
}
