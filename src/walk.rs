//! Ancestor directory walking and development-time config lookup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILENAME;
use crate::error::{Error, Result};

/// Iterator over the ancestor directories of a path, closest first.
///
/// Created by [`walk_parents`]. Ends after yielding the filesystem root.
#[derive(Debug, Clone)]
pub struct Parents {
    next: Option<PathBuf>,
}

impl Iterator for Parents {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let current = self.next.take()?;
        self.next = current.parent().map(Path::to_path_buf);
        Some(current)
    }
}

/// Walks from `path` up to the filesystem root.
///
/// `path` itself is yielded first only when it is a directory. Relative paths
/// are made absolute against the current directory (symlinks are not resolved).
#[must_use]
pub fn walk_parents(path: impl AsRef<Path>) -> Parents {
    let path = path.as_ref();
    let start = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let next = if start.is_dir() {
        Some(start)
    } else {
        start.parent().map(Path::to_path_buf)
    };
    Parents { next }
}

/// First `<ancestor>/<file_name>` that is a regular file, searching upward from `start`.
pub fn find_file_in_parents(start: impl AsRef<Path>, file_name: &str) -> Result<PathBuf> {
    walk_parents(start)
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| Error::NotFoundInParents(file_name.to_string()))
}

/// Locates the add-on's `config.json` above `start`. Used when testing and debugging.
pub fn find_config_json(start: impl AsRef<Path>) -> Result<PathBuf> {
    find_file_in_parents(start, CONFIG_FILENAME)
}

/// Reads and parses the `config.json` found above `start`.
pub fn load_dev_config(start: impl AsRef<Path>) -> Result<serde_json::Value> {
    let path = find_config_json(start)?;
    let content = fs::read_to_string(&path).map_err(|e| Error::io("read", &path, e))?;
    log::debug!("Loaded dev config from {}", path.display());
    serde_json::from_str(&content).map_err(|source| Error::Config { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_yielded_first() {
        let tmp = tempfile::tempdir().unwrap();
        let first = walk_parents(tmp.path()).next().unwrap();
        assert_eq!(first, tmp.path());
    }

    #[test]
    fn file_yields_only_ancestors() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        let chain: Vec<_> = walk_parents(&file).collect();
        assert_eq!(chain[0], tmp.path());
        assert!(!chain.contains(&file));
    }

    #[test]
    fn chain_shrinks_and_ends_at_root() {
        let tmp = tempfile::tempdir().unwrap();
        let deep = tmp.path().join("a").join("b");
        fs::create_dir_all(&deep).unwrap();
        let chain: Vec<_> = walk_parents(&deep).collect();
        for pair in chain.windows(2) {
            assert!(pair[0].starts_with(&pair[1]));
            assert_ne!(pair[0], pair[1]);
        }
        let root = chain.last().unwrap();
        assert!(root.parent().is_none());
    }

    #[test]
    fn walk_is_restartable() {
        let tmp = tempfile::tempdir().unwrap();
        let a: Vec<_> = walk_parents(tmp.path()).collect();
        let b: Vec<_> = walk_parents(tmp.path()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn relative_paths_are_anchored_at_cwd() {
        let chain: Vec<_> = walk_parents("no-such-dir/file.txt").collect();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(chain[0], cwd.join("no-such-dir"));
        assert!(chain.contains(&cwd));
        assert!(chain.last().unwrap().parent().is_none());
    }

    #[test]
    fn find_file_in_parents_finds_nearest() {
        let tmp = tempfile::tempdir().unwrap();
        let deep = tmp.path().join("src").join("helpers");
        fs::create_dir_all(&deep).unwrap();
        fs::write(tmp.path().join("config.json"), "{}").unwrap();
        fs::write(tmp.path().join("src").join("config.json"), "{}").unwrap();
        assert_eq!(
            find_config_json(&deep).unwrap(),
            tmp.path().join("src").join("config.json")
        );
    }

    #[test]
    fn find_file_in_parents_skips_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let deep = tmp.path().join("x");
        fs::create_dir_all(deep.join("marker-f0c1d")).unwrap();
        fs::write(tmp.path().join("marker-f0c1d"), "").unwrap();
        assert_eq!(
            find_file_in_parents(&deep, "marker-f0c1d").unwrap(),
            tmp.path().join("marker-f0c1d")
        );
    }

    #[test]
    fn find_file_in_parents_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = find_file_in_parents(tmp.path(), "surely-absent-3b9e.json").unwrap_err();
        assert!(matches!(err, Error::NotFoundInParents(ref n) if n == "surely-absent-3b9e.json"));
    }

    #[test]
    fn load_dev_config_parses_json() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("config.json"), r#"{"furigana": true}"#).unwrap();
        let cfg = load_dev_config(tmp.path()).unwrap();
        assert_eq!(cfg["furigana"], serde_json::json!(true));
    }

    #[test]
    fn load_dev_config_reports_bad_json() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("config.json"), "not json").unwrap();
        assert!(matches!(load_dev_config(tmp.path()), Err(Error::Config { .. })));
    }
}
