//! Compile-time constants and environment variable names.
//!
//! Centralizes the add-on name, directory layout, and env vars so the rest of
//! the crate stays decoupled from concrete values.

/// Add-on package name; namespaces the per-user data directory.
pub const ADDON_NAME: &str = "japanese";

/// Env var: explicit user data directory, wins over every other rule.
pub const ENV_USER_FILES_DIR: &str = "AJT_USER_FILES_DIR";

/// Env var: set to `"1"` to prefer a `user_files` directory next to the checkout.
pub const ENV_USE_REPO_USER_FILES: &str = "AJT_USE_REPO_USER_FILES";

/// Env var: XDG state home (Linux, checked first).
pub const ENV_XDG_STATE_HOME: &str = "XDG_STATE_HOME";

/// Env var: XDG data home (Linux, checked second).
pub const ENV_XDG_DATA_HOME: &str = "XDG_DATA_HOME";

/// Env var: roaming application data (Windows).
pub const ENV_APPDATA: &str = "APPDATA";

/// Env var: preferred terminal emulator.
pub const ENV_TERMINAL: &str = "TERMINAL";

/// Env var: preferred terminal file manager executable.
pub const ENV_FILE_MANAGER: &str = "FILE";

/// Env var: executable search path.
pub const ENV_PATH: &str = "PATH";

/// Env var: log filter for the `ajt-files` binary.
pub const ENV_LOG: &str = "AJT_LOG";

/// Linux category directory placed under the XDG base.
pub const LINUX_ADDONS_DIR: &str = "anki-addons";

/// Directory searched for by the legacy repo fallback.
pub const LEGACY_USER_FILES: &str = "user_files";

/// Development config file located by walking parents.
pub const CONFIG_FILENAME: &str = "config.json";

/// File manager looked up on `PATH` when `$FILE` is unset.
pub const DEFAULT_FILE_MANAGER: &str = "lf";

/// Opener looked up on `PATH` for the second strategy.
pub const XDG_OPEN: &str = "xdg-open";
