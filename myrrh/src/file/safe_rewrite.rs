/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A transactional in-place file rewrite. On construction, renames `path` to
/// a sibling `.tmp` file; the caller then writes the new content to `path`.
/// `commit` deletes the temporary; dropping without committing restores the
/// temporary over `path`, rolling the whole operation back.
///
/// At every observable moment either `path` or its temporary (or both,
/// briefly during the rename) exists — never neither.
pub struct SafeRewrite {
    original: PathBuf,
    temporary: PathBuf,
    committed: bool,
}

impl SafeRewrite {
    pub fn temporary_name(original: &Path) -> PathBuf {
        let mut name = original.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    pub fn new(original: &Path) -> Result<Self> {
        let temporary = Self::temporary_name(original);

        if temporary.exists() {
            fs::remove_file(&temporary)?;
        }
        fs::rename(original, &temporary)?;

        Ok(Self {
            original: original.to_path_buf(),
            temporary,
            committed: false,
        })
    }

    pub fn temporary_path(&self) -> &Path {
        &self.temporary
    }

    pub fn original_path(&self) -> &Path {
        &self.original
    }

    /// Confirms the new content written to `original_path()` since
    /// construction. Deletes the temporary.
    pub fn commit(mut self) -> Result<()> {
        fs::remove_file(&self.temporary)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for SafeRewrite {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if self.temporary.exists() {
            let _ = fs::remove_file(&self.original);
            let _ = fs::rename(&self.temporary, &self.original);
        }
    }
}

/// Crops a file to the byte range `[start, end)` produced by a pair of
/// scanners, via `SafeRewrite` + `PartialCopy`. Strong exception safety: any
/// failure restores the original file unchanged.
pub fn resize_file(
    path: &Path,
    start: crate::file::scanner::PositionScanner,
    end: crate::file::scanner::PositionScanner,
) -> Result<()> {
    let rewrite = SafeRewrite::new(path)?;

    match copy_cropped_range(&rewrite, start, end) {
        Ok(()) => rewrite.commit(),
        Err(err) => {
            drop(rewrite);
            Err(err)
        }
    }
}

fn copy_cropped_range(
    rewrite: &SafeRewrite,
    start: crate::file::scanner::PositionScanner,
    end: crate::file::scanner::PositionScanner,
) -> Result<()> {
    use crate::file::copy::PartialCopy;
    use std::fs::File;

    let mut input = File::open(rewrite.temporary_path())
        .map_err(|_| Error::NotOpen(rewrite.temporary_path().display().to_string()))?;
    let mut output = File::create(rewrite.original_path())?;
    PartialCopy::new(start, end).copy(&mut input, &mut output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::scanner::PositionScanner;
    use crate::tests_support::scratch_dir;

    #[test]
    fn commit_keeps_new_content() {
        let dir = scratch_dir("rewrite-commit");
        let path = dir.path().join("f.txt");
        fs::write(&path, b"original content").unwrap();

        let rewrite = SafeRewrite::new(&path).unwrap();
        assert!(!path.exists());
        assert!(rewrite.temporary_path().exists());

        fs::write(&path, b"new content").unwrap();
        rewrite.commit().unwrap();

        assert!(!SafeRewrite::temporary_name(&path).exists());
        assert_eq!(fs::read(&path).unwrap(), b"new content");
    }

    #[test]
    fn drop_without_commit_restores_original() {
        let dir = scratch_dir("rewrite-rollback");
        let path = dir.path().join("f.txt");
        fs::write(&path, b"original content").unwrap();

        {
            let _rewrite = SafeRewrite::new(&path).unwrap();
            fs::write(&path, b"partial garbage").unwrap();
            // dropped here without commit
        }

        assert_eq!(fs::read(&path).unwrap(), b"original content");
        assert!(!SafeRewrite::temporary_name(&path).exists());
    }

    #[test]
    fn resize_crops_to_line_aligned_range() {
        let dir = scratch_dir("resize-basic");
        let path = dir.path().join("f.log");
        let line = b"Original content\n";
        let mut content = Vec::new();
        for _ in 0..6 {
            content.extend_from_slice(line);
        }
        fs::write(&path, &content).unwrap();

        resize_file(
            &path,
            PositionScanner::FromEndByLines(64),
            PositionScanner::End,
        )
        .unwrap();

        let cropped = fs::read(&path).unwrap();
        assert_eq!(cropped.len(), 3 * line.len());
        assert_eq!(cropped, line.repeat(3));
    }
}
