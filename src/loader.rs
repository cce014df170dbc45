// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Package loading.
//!
//! Type-checking the target language is left to an external tool that
//! writes a JSON [`Package`] snapshot into each package directory. The
//! orchestrator only sees the [`PackageLoader`] trait, so a different
//! source of snapshots can be plugged in.

use std::{
    fs,
    path::{Path, PathBuf}
};

use repogen_core::Package;
use tracing::debug;

use crate::error::{Error, Result};

/// Source of package snapshots.
pub trait PackageLoader: Sync {
    /// Load the package in directory `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when the package cannot be read or decoded.
    fn load(&self, dir: &Path) -> Result<Package>;
}

/// Loads `<dir>/<file name>` JSON snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    file_name: String
}

impl SnapshotLoader {
    /// Loader reading snapshots named `file_name`.
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into()
        }
    }

    /// Snapshot path of the package in `dir`.
    #[must_use]
    pub fn path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

impl PackageLoader for SnapshotLoader {
    fn load(&self, dir: &Path) -> Result<Package> {
        let path = self.path(dir);
        let raw = fs::read_to_string(&path).map_err(|source| Error::io(&path, source))?;
        let package: Package = serde_json::from_str(&raw).map_err(|source| Error::Snapshot {
            path: path.clone(),
            source
        })?;

        debug!(path = %path.display(), package = %package.name, decls = package.decls.len(), "loaded snapshot");
        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("snap.json"),
            r#"{"name": "repo", "path": "example.com/repo", "decls": [
                {"name": "ID", "pos": {"file": "id.go", "line": 3, "column": 6},
                 "type": {"kind": "basic", "name": "int64"}}
            ]}"#
        )
        .unwrap();

        let package = SnapshotLoader::new("snap.json").load(dir.path()).unwrap();
        assert_eq!(package.name, "repo");
        assert_eq!(package.decls[0].name, "ID");
        assert!(package.files.is_empty());
    }

    #[test]
    fn missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let err = SnapshotLoader::new("snap.json").load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn invalid_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("snap.json"), "{\"name\": 1}").unwrap();
        let err = SnapshotLoader::new("snap.json").load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("invalid package snapshot"));
    }
}
