//! Environment lookups and platform identification.
//!
//! Path resolution reads the environment only through [`Env`], so tests can
//! inject a fake environment and any [`Platform`] instead of depending on the
//! host OS.

use std::path::{Path, PathBuf};

/// Platform families with distinct data directory rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    /// Windows and every platform without a rule of its own.
    Windows,
}

impl Platform {
    /// Platform the crate was compiled for.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Windows
        }
    }
}

/// Read access to environment variables and the user's home directory.
pub trait Env {
    /// Value of `key`, or `None` when unset or empty.
    fn var(&self, key: &str) -> Option<String>;

    fn home_dir(&self) -> Option<PathBuf>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Env for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
            .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
            .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
    }
}

/// Replaces a leading `~` component with the home directory.
///
/// `~user` forms and paths without a leading `~` are returned unchanged, as is
/// `~` itself when no home directory is known.
#[must_use]
pub fn expand_home(path: &Path, env: &dyn Env) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match env.home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
