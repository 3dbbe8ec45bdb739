//! Opening files in an external viewer.
//!
//! Strategies, in priority order:
//! 1. `$TERMINAL -e <file manager> <path>` when a terminal and a file manager
//!    (`$FILE`, else `lf` on `PATH`) are both available.
//! 2. `xdg-open file://<path>` when `xdg-open` is on `PATH`.
//! 3. The host's own opener, with bundled libraries suspended.
//!
//! Launched programs are detached; the caller never waits, and exited children
//! are reaped on a background thread.

use std::ffi::OsString;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::config::{DEFAULT_FILE_MANAGER, ENV_FILE_MANAGER, ENV_PATH, ENV_TERMINAL, XDG_OPEN};
use crate::env::{Env, SystemEnv};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Host collaborators
// ---------------------------------------------------------------------------

/// Facilities provided by the application hosting the add-on.
pub trait Host {
    /// Opens a local file with the host's URL handler.
    fn open_local_file(&self, path: &Path) -> Result<()>;

    /// Runs `f` with the add-on's bundled library search path suspended.
    fn without_bundled_libs(&self, f: &mut dyn FnMut() -> Result<()>) -> Result<()>;
}

/// Host backed by the desktop's default handler via `opener`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn open_local_file(&self, path: &Path) -> Result<()> {
        opener::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
    }

    fn without_bundled_libs(&self, f: &mut dyn FnMut() -> Result<()>) -> Result<()> {
        // A standalone process carries no bundled library path.
        f()
    }
}

// ---------------------------------------------------------------------------
// Executable discovery
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(windows)]
const EXE_SUFFIXES: &[&str] = &["", ".exe", ".cmd", ".bat"];

#[cfg(not(windows))]
const EXE_SUFFIXES: &[&str] = &[""];

/// Finds `name` on the `PATH` visible through `env`.
#[must_use]
pub fn find_executable(name: &str, env: &dyn Env) -> Option<PathBuf> {
    let path_var = env.var(ENV_PATH)?;
    std::env::split_paths(&path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| {
            EXE_SUFFIXES
                .iter()
                .map(move |suffix| dir.join(format!("{name}{suffix}")))
        })
        .find(|candidate| is_executable(candidate))
}

// ---------------------------------------------------------------------------
// Strategy selection
// ---------------------------------------------------------------------------

/// How a file will be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    /// A terminal file manager running inside the preferred terminal.
    FileManager { terminal: String, manager: PathBuf },
    /// The desktop's `xdg-open`.
    XdgOpen(PathBuf),
    /// The host application's own opener.
    Host,
}

impl Viewer {
    /// Command that launches this viewer for `path`. `None` for [`Viewer::Host`].
    #[must_use]
    pub fn command(&self, path: &Path) -> Option<Command> {
        match self {
            Self::FileManager { terminal, manager } => {
                let mut cmd = Command::new(terminal);
                cmd.arg("-e").arg(manager).arg(path);
                Some(cmd)
            }
            Self::XdgOpen(program) => {
                let mut url = OsString::from("file://");
                url.push(path);
                let mut cmd = Command::new(program);
                cmd.arg(url);
                Some(cmd)
            }
            Self::Host => None,
        }
    }

    /// The viewer tried after this one fails to launch.
    fn fallback(&self, env: &dyn Env) -> Self {
        match self {
            Self::FileManager { .. } => find_executable(XDG_OPEN, env)
                .map(Self::XdgOpen)
                .unwrap_or(Self::Host),
            Self::XdgOpen(_) | Self::Host => Self::Host,
        }
    }
}

/// Picks the first available viewer.
#[must_use]
pub fn select_viewer(env: &dyn Env) -> Viewer {
    let terminal = env.var(ENV_TERMINAL);
    let manager = || {
        env.var(ENV_FILE_MANAGER)
            .map(PathBuf::from)
            .or_else(|| find_executable(DEFAULT_FILE_MANAGER, env))
    };
    if let Some(terminal) = terminal {
        if let Some(manager) = manager() {
            return Viewer::FileManager { terminal, manager };
        }
    }
    find_executable(XDG_OPEN, env)
        .map(Viewer::XdgOpen)
        .unwrap_or(Viewer::Host)
}

// ---------------------------------------------------------------------------
// Launch
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

/// Spawns `cmd` in its own process group without waiting for it.
///
/// The child is reaped on a background thread; dropping the returned handle
/// leaves that thread running.
fn spawn_detached(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    detach(&mut cmd);
    cmd.stdin(Stdio::null());
    let mut child = cmd.spawn()?;
    Ok(thread::spawn(move || child.wait()))
}

/// Shows `path` using the real environment and the desktop's default handler.
pub fn open_file(path: impl AsRef<Path>) -> Result<()> {
    open_file_with(path.as_ref(), &SystemEnv, &SystemHost)
}

/// Shows `path` with the first viewer that launches.
///
/// A viewer whose program turns out to be missing at spawn time is skipped;
/// any other launch error is returned.
pub fn open_file_with(path: &Path, env: &dyn Env, host: &dyn Host) -> Result<()> {
    open_with_viewer(select_viewer(env), path, env, host)
}

/// Launches `viewer`, walking its fallbacks until one starts.
fn open_with_viewer(mut viewer: Viewer, path: &Path, env: &dyn Env, host: &dyn Host) -> Result<()> {
    loop {
        let Some(cmd) = viewer.command(path) else {
            log::debug!("Opening {} with host opener", path.display());
            return host.without_bundled_libs(&mut || host.open_local_file(path));
        };
        let program = PathBuf::from(cmd.get_program());
        log::debug!("Opening {} with {:?}", path.display(), viewer);
        match spawn_detached(cmd) {
            Ok(_reaper) => return Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("{} not found; trying next viewer", program.display());
                viewer = viewer.fallback(env);
            }
            Err(source) => return Err(Error::Launch { program, source }),
        }
    }
}
