//! Filesystem helpers for the AJT Anki add-ons: a per-user data directory,
//! idempotent file utilities, parent-directory walking, and opening files in
//! an external viewer.

pub mod config;
pub mod env;
pub mod error;
pub mod files;
pub mod paths;
pub mod viewer;
pub mod walk;

#[cfg(test)]
mod test_support;

pub use env::{Env, Platform, SystemEnv};
pub use error::{Error, Result};
pub use files::{file_exists, remove, touch};
pub use paths::{platform_data_home, resolve_user_files_dir, user_files_dir};
pub use viewer::{Host, SystemHost, Viewer, open_file, open_file_with, select_viewer};
pub use walk::{find_config_json, find_file_in_parents, load_dev_config, walk_parents};
