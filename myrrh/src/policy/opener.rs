/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path as FsPath, PathBuf};

use crate::file::resize_file;
use crate::file::scanner::PositionScanner;
use crate::policy::path::Path;

/// An open output file plus the running count of bytes this process has
/// written (or observed at append-open time) for it. `Policy` owns exactly
/// one at a time and replaces it wholesale on rotation.
///
/// Carries a no-throw contract on `write`: an opener that failed to obtain a
/// real file still returns a `FileHandle`, just one whose every write fails.
/// This keeps the "no throw from the logging hot path" guarantee out of
/// `Policy::write`'s hands entirely.
pub struct FileHandle {
    path: PathBuf,
    file: Option<File>,
    written_size: u64,
}

impl FileHandle {
    pub(crate) fn broken(path: PathBuf) -> Self {
        Self {
            path,
            file: None,
            written_size: 0,
        }
    }

    fn open(path: PathBuf, file: File, written_size: u64) -> Self {
        Self {
            path,
            file: Some(file),
            written_size,
        }
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    pub fn written_size(&self) -> u64 {
        self.written_size
    }

    /// True if this handle holds a live file descriptor. A handle returned
    /// by a failed open reports `false` here and fails every subsequent
    /// write.
    pub(crate) fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Writes `text` and returns the number of bytes actually written, or
    /// `-1` on any failure. Never panics or propagates an error.
    pub fn write(&mut self, text: &str) -> i64 {
        let Some(file) = self.file.as_mut() else {
            return -1;
        };
        match file.write_all(text.as_bytes()).and_then(|_| file.flush()) {
            Ok(()) => {
                let written = text.len() as u64;
                self.written_size += written;
                written as i64
            }
            Err(_) => -1,
        }
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

/// Decides which concrete file a policy should open for its next write.
pub enum Opener {
    /// Scans the filesystem for the newest existing file this `Path` could
    /// have generated and appends to it; falls back to generating a new
    /// path when no matching file exists.
    Appender,
    /// Always generates a fresh path and creates it, truncating anything
    /// already there.
    Creator,
    /// Crops the target file to its trailing `size_left` whole-line-aligned
    /// bytes (via `resize_file`) before reopening it for append.
    Resizer(u64),
}

impl Opener {
    /// Opens the next file for `path`. Never fails outwardly: internal
    /// errors produce a `FileHandle` whose writes report `-1`.
    pub fn open(&self, path: &mut Path) -> FileHandle {
        match self {
            Opener::Appender => open_append(path),
            Opener::Creator => open_create(path),
            Opener::Resizer(size_left) => open_resize(path, *size_left),
        }
    }
}

fn open_append(path: &mut Path) -> FileHandle {
    let target = select_path_to_use(path);
    create_directory_tree(&target);

    let opened = OpenOptions::new().create(true).append(true).open(&target);
    match opened {
        Ok(file) => {
            let size = file.metadata().map(|m| m.len()).unwrap_or(0);
            FileHandle::open(target, file, size)
        }
        Err(_) => FileHandle::broken(target),
    }
}

fn open_create(path: &mut Path) -> FileHandle {
    let target = path.generate();
    create_directory_tree(&target);

    let opened = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&target);
    match opened {
        Ok(file) => FileHandle::open(target, file, 0),
        Err(_) => FileHandle::broken(target),
    }
}

fn open_resize(path: &mut Path, size_left: u64) -> FileHandle {
    let target = path.generate();

    if target.exists() {
        // Best-effort: a failed resize still falls through to the
        // append-open below, which reports its own failure via the handle.
        let _ = resize_file(
            &target,
            PositionScanner::FromEndByLines(size_left),
            PositionScanner::End,
        );
    } else {
        create_directory_tree(&target);
    }

    let opened = OpenOptions::new().create(true).append(true).open(&target);
    match opened {
        Ok(file) => {
            let size = file.metadata().map(|m| m.len()).unwrap_or(0);
            FileHandle::open(target, file, size)
        }
        Err(_) => FileHandle::broken(target),
    }
}

/// Walks the path's entities from the root, at each level listing the
/// children of the current folder that match that entity's pattern and
/// picking the newest via the entity's comparer. Descends into matching
/// directories, adopts a matching leaf file. Any dead end (no match, or a
/// non-directory match before the last entity) falls back to generating a
/// brand new path.
fn select_path_to_use(path: &mut Path) -> PathBuf {
    select_path_to_use_hide_errors(path).unwrap_or_else(|| path.generate())
}

fn select_path_to_use_hide_errors(path: &Path) -> Option<PathBuf> {
    let entities = path.entities();
    let mut folder = if path.parent_dir().as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        path.parent_dir().to_path_buf()
    };

    for (i, entity) in entities.iter().enumerate() {
        let matcher = entity.matcher();
        let comparer = entity.comparer();

        let candidates: Vec<PathBuf> = walkdir::WalkDir::new(&folder)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|candidate| {
                candidate
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|name| matcher.is_match(name))
                    .unwrap_or(false)
            })
            .collect();

        let best = candidates.into_iter().max_by(|a, b| {
            let name_a = a.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let name_b = b.file_name().and_then(|n| n.to_str()).unwrap_or("");
            comparer(name_a, name_b)
        })?;

        let is_last = i + 1 == entities.len();

        if best.is_dir() {
            folder = best;
            continue;
        }

        if !is_last {
            return None;
        }

        return Some(best);
    }

    None
}

/// Best-effort directory tree creation for the parent of `target`; failures
/// are swallowed because the subsequent open attempt surfaces the real
/// error.
fn create_directory_tree(target: &FsPath) {
    if let Some(parent) = target.parent() {
        let _ = fs::create_dir_all(parent);
    }
}
