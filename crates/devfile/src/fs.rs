// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Filesystem access used when resolving path-based devfiles.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

#[cfg(test)]
#[path = "./fs_test.rs"]
mod fs_test;

/// The filesystem operations needed to locate and load a devfile.
pub trait Filesystem: Debug + Send + Sync {
    /// Report whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full contents of the file at `path`.
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Turn `path` into the canonical absolute path used to identify it.
    fn absolute(&self, path: &Path) -> std::io::Result<PathBuf>;
}

/// [`Filesystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFs;

impl Filesystem for DefaultFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn absolute(&self, path: &Path) -> std::io::Result<PathBuf> {
        let path = expand_home(path)?;
        let path = if path.is_absolute() {
            path
        } else {
            std::env::current_dir()?.join(path)
        };
        dunce::canonicalize(path)
    }
}

/// Expand a leading `~` into the current user's home directory.
pub(crate) fn expand_home(path: &Path) -> std::io::Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_owned());
    };
    let home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot resolve ~ without HOME",
        )
    })?;
    Ok(home.join(rest))
}
