/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::path::PathBuf;

use crate::policy::opener::{FileHandle, Opener};
use crate::policy::path::Path;
use crate::policy::restriction::RestrictionStore;

/// Composes a `Path`, two `Opener`s, and a `RestrictionStore` into a single
/// write-accepting log sink. Exactly one `FileHandle` is current between
/// writes; rotation fully closes the old handle before opening the new one.
///
/// `Policy::write` never raises: a misconfigured opener or an unwritable
/// target is reported by returning `-1`, matching the no-throw contract the
/// logging hot path relies on.
pub struct Policy {
    path: Path,
    restrictions: RestrictionStore,
    subsequent: Opener,
    current: FileHandle,
}

impl Policy {
    /// Builds a policy and opens its first file with `initial`.
    /// `restrictions` are the caller-supplied ones; any restrictions the
    /// path's own parts contribute (currently only `Date`, via its
    /// `DateChanged`) are installed ahead of them.
    pub fn new(
        mut path: Path,
        initial: Opener,
        subsequent: Opener,
        restrictions: RestrictionStore,
    ) -> Self {
        let mut all_restrictions = RestrictionStore::new();
        path.append_restrictions(&mut all_restrictions);
        all_restrictions.merge(restrictions);

        let current = initial.open(&mut path);

        Self {
            path,
            restrictions: all_restrictions,
            subsequent,
            current,
        }
    }

    /// The path of the file currently open for appending.
    pub fn current_path(&self) -> PathBuf {
        self.current.path().to_path_buf()
    }

    /// Writes `text`, rotating the target file first if any restriction
    /// demands it. Returns the number of bytes of `text` accepted, or `-1`
    /// on failure. Platform line-ending expansion (`\n` observed as
    /// written `\r\n`) is normalized away so the return value always
    /// reflects `text.len()` on a logical success.
    pub fn write(&mut self, text: &str) -> i64 {
        let original = self.current.path().to_path_buf();
        let pending_size = text.len() as u64;

        let mut rotated_once = false;
        while self.restrictions.should_rotate(&self.current, pending_size) {
            let old = std::mem::replace(&mut self.current, FileHandle::broken(original.clone()));
            drop(old);

            let new_handle = self.subsequent.open(&mut self.path);
            if !new_handle.is_open() {
                self.current = new_handle;
                return -1;
            }

            let new_path_is_original = new_handle.path() == original;
            self.current = new_handle;

            // Loop-safety: a subsequent Opener that keeps handing back the
            // very file we started with would otherwise spin forever if
            // its own restriction never clears. One forced rotation is
            // always honored; a second landing back on `original` stops
            // the loop rather than looping indefinitely.
            if rotated_once && new_path_is_original {
                break;
            }
            rotated_once = true;
        }

        self.commit_write(text)
    }

    fn commit_write(&mut self, text: &str) -> i64 {
        let observed = self.current.write(text);
        if observed < 0 {
            return -1;
        }

        let observed = observed as u64;
        let len = text.len() as u64;
        let newlines = text.bytes().filter(|&b| b == b'\n').count() as u64;

        if observed == len || observed == len + newlines {
            len as i64
        } else {
            observed as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::path_part::PathPart;
    use crate::policy::restriction::Restriction;
    use crate::tests_support::scratch_dir;
    use std::fs;

    fn fixed_path(dir: &std::path::Path, name: &str) -> Path {
        let mut path = Path::with_parent(dir);
        path.add_text(name).unwrap();
        path
    }

    #[test]
    fn writes_accumulate_in_a_single_file_without_restrictions() {
        let dir = scratch_dir("policy-plain");
        let path = fixed_path(dir.path(), "app.log");

        let mut policy = Policy::new(
            path,
            Opener::Creator,
            Opener::Creator,
            RestrictionStore::new(),
        );

        assert_eq!(policy.write("one\n"), 4);
        assert_eq!(policy.write("two\n"), 4);

        let contents = fs::read_to_string(policy.current_path()).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn size_restriction_rotates_by_resizing() {
        let dir = scratch_dir("policy-resize");
        let path = fixed_path(dir.path(), "app.log");

        let mut restrictions = RestrictionStore::new();
        restrictions.add(Restriction::size(100));

        let mut policy = Policy::new(path, Opener::Creator, Opener::Resizer(50), restrictions);

        for _ in 0..15 {
            policy.write(&"x".repeat(19) + "\n");
            let size = fs::metadata(policy.current_path()).unwrap().len();
            assert!(size <= 100, "file grew past the configured max: {size}");
        }
    }

    #[test]
    fn size_restriction_rotates_to_a_new_file() {
        let dir = scratch_dir("policy-new-file");
        let mut path = Path::with_parent(dir.path());
        path.add_text("myrrh").unwrap();
        path.add_part(PathPart::index()).unwrap();
        path.add_part(PathPart::text(".log").unwrap()).unwrap();

        let mut restrictions = RestrictionStore::new();
        restrictions.add(Restriction::size(40));

        let mut policy = Policy::new(path, Opener::Creator, Opener::Creator, restrictions);

        let first_path = policy.current_path();
        policy.write(&"x".repeat(19));
        policy.write(&"x".repeat(19));
        policy.write(&"x".repeat(19));
        let second_path = policy.current_path();

        assert_ne!(first_path, second_path);
    }

    #[test]
    fn broken_initial_opener_reports_failed_writes() {
        let dir = scratch_dir("policy-broken");
        // A path whose parent cannot be created (a file stands where a
        // directory is expected) makes the initial open fail.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let mut path = Path::with_parent(&blocker);
        path.add_text("app.log").unwrap();

        let mut policy = Policy::new(
            path,
            Opener::Creator,
            Opener::Creator,
            RestrictionStore::new(),
        );
        assert_eq!(policy.write("data"), -1);
    }
}
