/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fs;
use std::path::{Path, PathBuf};

/// Deletes a filesystem path on drop unless `release`d first.
///
/// Intended to guard a path that is created speculatively by a multi-step
/// operation: if a later step fails, the scope unwinds and the half-built
/// path is cleaned up; if every step succeeds, the caller releases the
/// eraser and the path survives.
pub struct ScopedEraser {
    path: Option<PathBuf>,
}

impl ScopedEraser {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Disarms the eraser; the guarded path will not be removed on drop.
    pub fn release(mut self) {
        self.path = None;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Drop for ScopedEraser {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if path.is_dir() {
                let _ = fs::remove_dir_all(&path);
            } else {
                let _ = fs::remove_file(&path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::scratch_dir;

    #[test]
    fn removes_file_on_drop_unless_released() {
        let dir = scratch_dir("eraser");
        let path = dir.path().join("gone.txt");
        fs::write(&path, b"x").unwrap();
        {
            let _eraser = ScopedEraser::new(&path);
        }
        assert!(!path.exists());
    }

    #[test]
    fn keeps_file_when_released() {
        let dir = scratch_dir("eraser-release");
        let path = dir.path().join("stays.txt");
        fs::write(&path, b"x").unwrap();
        let eraser = ScopedEraser::new(&path);
        eraser.release();
        assert!(path.exists());
    }
}
