/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::MutexGuard;

use crate::log::log_impl::LogState;
use crate::log::severity::Severity;

/// The per-call-site builder for one line of log output. Constructed by
/// `Log::record`; emits on destruction. A record whose level is filtered
/// out by the global threshold is inert: it holds no buffer and no lock,
/// and every write into it is a no-op.
///
/// Only ever meant to live for the duration of a single statement
/// (construct, push content, let it drop), never held across calls.
pub struct Record<'a> {
    pub(super) active: Option<ActiveRecord<'a>>,
}

pub(super) struct ActiveRecord<'a> {
    pub(super) level: Severity,
    pub(super) guard: MutexGuard<'a, LogState>,
    pub(super) buffer: String,
}

impl<'a> Record<'a> {
    pub(super) fn inert() -> Self {
        Record { active: None }
    }

    /// True if this record will actually be emitted. Mostly useful for
    /// callers that want to skip expensive formatting entirely.
    pub fn is_writable(&self) -> bool {
        self.active.is_some()
    }
}

impl std::fmt::Write for Record<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        if let Some(active) = &mut self.active {
            active.buffer.push_str(s);
        }
        Ok(())
    }
}

impl Drop for Record<'_> {
    fn drop(&mut self) {
        let Some(ActiveRecord {
            level,
            mut guard,
            mut buffer,
        }) = self.active.take()
        else {
            return;
        };

        buffer.push('\n');
        for target in guard.targets.iter_mut() {
            if level <= target.min_level {
                target.sink.write_line(&buffer);
                target.sink.flush();
            }
        }

        buffer.clear();
        guard.scratch = buffer;
    }
}
