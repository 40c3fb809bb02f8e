/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Minimal scratch-directory fixture for `#[cfg(test)]` modules. Not part of
//! the public API.

#![cfg(test)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Creates a fresh empty directory under the system temp dir, unique per
/// call even across concurrent tests in the same process.
pub fn scratch_dir(label: &str) -> ScratchDir {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("myrrh-test-{}-{}-{}", std::process::id(), label, n));
    fs::create_dir_all(&path).expect("failed to create scratch dir");
    ScratchDir { path }
}
