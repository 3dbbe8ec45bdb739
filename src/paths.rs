//! Per-user data directory resolution.
//!
//! Keeps the platform rules and env overrides in one place so callers only ask
//! for [`user_files_dir`]. The directory is computed once at first use and
//! reused for the rest of the process.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::{
    ADDON_NAME, ENV_APPDATA, ENV_USE_REPO_USER_FILES, ENV_USER_FILES_DIR, ENV_XDG_DATA_HOME,
    ENV_XDG_STATE_HOME, LEGACY_USER_FILES, LINUX_ADDONS_DIR,
};
use crate::env::{Env, Platform, SystemEnv, expand_home};
use crate::error::{Error, Result};
use crate::walk::walk_parents;

static USER_FILES_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Platform-standard data directory for `addon_name`. Pure path arithmetic.
pub fn platform_data_home(platform: Platform, env: &dyn Env, addon_name: &str) -> Result<PathBuf> {
    let home = || env.home_dir().ok_or(Error::NoHomeDir);
    let path = match platform {
        Platform::Linux => {
            let base = match env
                .var(ENV_XDG_STATE_HOME)
                .or_else(|| env.var(ENV_XDG_DATA_HOME))
            {
                Some(base) => PathBuf::from(base),
                None => home()?.join(".local").join("share"),
            };
            base.join(LINUX_ADDONS_DIR).join(addon_name)
        }
        Platform::MacOs => home()?
            .join("Library")
            .join("Application Support")
            .join("Anki")
            .join("Addons")
            .join(addon_name),
        Platform::Windows => {
            let base = match env.var(ENV_APPDATA) {
                Some(base) => PathBuf::from(base),
                None => home()?.join("AppData").join("Roaming"),
            };
            base.join("Anki").join("Addons").join(addon_name)
        }
    };
    Ok(path)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn legacy_user_files(anchor: &Path) -> Option<PathBuf> {
    walk_parents(anchor)
        .map(|dir| dir.join(LEGACY_USER_FILES))
        .find(|candidate| candidate.is_dir())
}

/// Resolves the user data directory without caching.
///
/// Priority: `$AJT_USER_FILES_DIR`, then the platform default (always created),
/// then, only when `$AJT_USE_REPO_USER_FILES` is `"1"`, the nearest `user_files`
/// directory above `anchor`. The legacy directory replaces the platform default
/// even though the latter has already been created.
pub fn resolve_user_files_dir(
    env: &dyn Env,
    platform: Platform,
    anchor: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(dir) = env.var(ENV_USER_FILES_DIR) {
        let path = expand_home(Path::new(&dir), env);
        create_dir(&path)?;
        log::debug!("User files dir from {}: {}", ENV_USER_FILES_DIR, path.display());
        return Ok(path);
    }

    let path = platform_data_home(platform, env, ADDON_NAME)?;
    create_dir(&path)?;

    if env.var(ENV_USE_REPO_USER_FILES).as_deref() == Some("1") {
        match anchor.and_then(legacy_user_files) {
            Some(legacy) => {
                log::debug!("Using legacy repo user files: {}", legacy.display());
                return Ok(legacy);
            }
            None => log::debug!(
                "No legacy {} dir found; using platform default",
                LEGACY_USER_FILES
            ),
        }
    }

    log::debug!("User files dir: {}", path.display());
    Ok(path)
}

/// Returns the value in `cell`, computing and storing it on first success.
///
/// Errors are returned without being stored, so a later call retries.
fn memoized<'a>(
    cell: &'a OnceLock<PathBuf>,
    compute: impl FnOnce() -> Result<PathBuf>,
) -> Result<&'a Path> {
    if let Some(path) = cell.get() {
        return Ok(path.as_path());
    }
    let path = compute()?;
    Ok(cell.get_or_init(|| path).as_path())
}

/// Returns the per-user writable directory for this add-on (cached after first use).
///
/// The legacy fallback searches upward from the running executable.
pub fn user_files_dir() -> Result<&'static Path> {
    memoized(&USER_FILES_DIR, || {
        let anchor = std::env::current_exe().ok();
        resolve_user_files_dir(&SystemEnv, Platform::current(), anchor.as_deref())
    })
}
