/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::policy::opener::FileHandle;

/// A condition that decides when a policy should rotate its target file.
/// `RestrictionStore::should_rotate` evaluates every restriction on every
/// call rather than short-circuiting on the first match, because stateful
/// restrictions like `DateChanged` must observe each call to track change.
#[derive(Debug)]
pub enum Restriction {
    /// Rotate once `file.written_size() + pending` would exceed `max_bytes`.
    Size(u64),
    /// Rotate the first time the calendar date changes since the last call.
    DateChanged(DateChangedState),
}

#[derive(Debug, Default)]
pub struct DateChangedState {
    last_date: std::sync::Mutex<Option<chrono::NaiveDate>>,
}

impl Restriction {
    pub fn size(max_bytes: u64) -> Self {
        Restriction::Size(max_bytes)
    }

    pub fn date_changed() -> Self {
        Restriction::DateChanged(DateChangedState::default())
    }

    /// Evaluates this restriction against the current file and the size of
    /// the pending write. Returns `true` if the target should be rotated
    /// before this write lands.
    fn check(&self, file: &FileHandle, pending_size: u64) -> bool {
        match self {
            Restriction::Size(max_bytes) => file.written_size() + pending_size > *max_bytes,
            Restriction::DateChanged(state) => {
                let today = chrono::Local::now().date_naive();
                let mut last = state.last_date.lock().unwrap();
                match *last {
                    Some(previous) if previous != today => {
                        *last = Some(today);
                        true
                    }
                    Some(_) => false,
                    None => {
                        *last = Some(today);
                        false
                    }
                }
            }
        }
    }
}

/// An ordered collection of restrictions guarding one policy target.
#[derive(Debug, Default)]
pub struct RestrictionStore {
    restrictions: Vec<Restriction>,
}

impl RestrictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, restriction: Restriction) {
        self.restrictions.push(restriction);
    }

    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty()
    }

    /// Appends every restriction from `other`, preserving relative order.
    pub fn merge(&mut self, mut other: RestrictionStore) {
        self.restrictions.append(&mut other.restrictions);
    }

    /// Evaluates every restriction against `file`; rotation is due if any of
    /// them reports it. Every restriction is checked regardless of earlier
    /// results, since stateful restrictions like `DateChanged` must observe
    /// every call to track their own state correctly.
    pub fn should_rotate(&self, file: &FileHandle, pending_size: u64) -> bool {
        let mut rotate = false;
        for restriction in &self.restrictions {
            if restriction.check(file, pending_size) {
                rotate = true;
            }
        }
        rotate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::opener::Opener;
    use crate::policy::path::Path;
    use crate::policy::path_part::PathPart;
    use crate::tests_support::scratch_dir;
    use std::fs;

    fn handle_with_size(dir: &std::path::Path, name: &str, content: &[u8]) -> FileHandle {
        fs::write(dir.join(name), content).unwrap();
        let mut path = Path::with_parent(dir);
        path.add_text(name).unwrap();
        Opener::Appender.open(&mut path)
    }

    #[test]
    fn size_restriction_triggers_only_past_threshold() {
        let dir = scratch_dir("restriction-size");
        let handle = handle_with_size(dir.path(), "f.log", b"12345");

        let loose = Restriction::size(10);
        assert!(!loose.check(&handle, 1));

        let tight = Restriction::size(5);
        assert!(!tight.check(&handle, 0));
        assert!(tight.check(&handle, 1));
    }

    #[test]
    fn size_restriction_accounts_for_pending_write() {
        let dir = scratch_dir("restriction-size-pending");
        let handle = handle_with_size(dir.path(), "f.log", b"1234567890");

        let restriction = Restriction::size(15);
        assert!(!restriction.check(&handle, 5));
        assert!(restriction.check(&handle, 6));
    }

    #[test]
    fn date_changed_is_false_on_first_observation() {
        let restriction = Restriction::date_changed();
        let dir = scratch_dir("restriction-date");
        let handle = handle_with_size(dir.path(), "f.log", b"x");
        assert!(!restriction.check(&handle, 0));
        // Same day, second call: still false.
        assert!(!restriction.check(&handle, 0));
    }

    #[test]
    fn store_evaluates_every_restriction_even_after_a_match() {
        let dir = scratch_dir("restriction-store");
        let handle = handle_with_size(dir.path(), "f.log", b"12345678901234567890");

        let mut store = RestrictionStore::new();
        store.add(Restriction::size(1));
        store.add(Restriction::date_changed());

        // The size restriction already trips; the date restriction still
        // gets its first observation recorded via this call.
        assert!(store.should_rotate(&handle, 0));
        if let Restriction::DateChanged(state) = &store.restrictions[1] {
            assert!(state.last_date.lock().unwrap().is_some());
        }
    }

    #[test]
    fn empty_store_never_rotates() {
        let dir = scratch_dir("restriction-store-empty");
        let handle = handle_with_size(dir.path(), "f.log", b"anything");
        let store = RestrictionStore::new();
        assert!(store.is_empty());
        assert!(!store.should_rotate(&handle, u64::MAX));
    }
}
