use std::{
    env, io,
    path::{Path, PathBuf},
};

use crate::interpreter::filesystem::normalize;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "URO_LOG";
/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Everything needed to run one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute, lexically normalized starting location.
    pub location: PathBuf,
    /// Program text.
    pub source:   String,
}

impl Config {
    /// Resolves the starting location against the current directory.
    ///
    /// # Parameters
    /// - `directory`: Directory given on the command line, if any.
    /// - `source`: Program text.
    ///
    /// # Errors
    /// Fails when the current directory cannot be determined.
    ///
    /// # Example
    /// ```
    /// use std::path::Path;
    ///
    /// use uro::config::Config;
    ///
    /// let config = Config::new(Some(Path::new("/tmp/a/../b")), String::new()).unwrap();
    /// assert_eq!(config.location, Path::new("/tmp/b"));
    /// ```
    pub fn new(directory: Option<&Path>, source: String) -> io::Result<Self> {
        let current = env::current_dir()?;
        let location = match directory {
            Some(dir) => normalize(&current.join(dir)),
            None => normalize(&current),
        };

        Ok(Self { location, source })
    }
}
