/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::log::header::{HeaderWriter, TimestampHeader};
use crate::log::output_guard::OutputGuard;
use crate::log::record::{ActiveRecord, Record};
use crate::log::severity::Severity;
use crate::log::sink::Sink;

pub(crate) struct Target {
    pub(crate) id: u64,
    pub(crate) min_level: Severity,
    pub(crate) sink: Box<dyn Sink>,
}

pub(crate) struct LogState {
    pub(crate) targets: Vec<Target>,
    pub(crate) header: Box<dyn HeaderWriter>,
    pub(crate) scratch: String,
}

/// The process-wide log sink: an ordered list of (target, minimum level)
/// registrations, a global severity threshold, a header writer, and the
/// mutex that serializes every writable record across producer threads.
///
/// `Log` is usable as a plain value (handy for tests, or a process that
/// wants more than one independent log) or as the process singleton via
/// [`Log::global`]. Configuration methods (`add_target`, `set_global_level`,
/// `set_header`, `remove_all_targets`) are not safe to call concurrently
/// with logging in progress; callers are expected to configure before
/// spawning producer threads or during a quiescent interval, per the
/// concurrency contract this crate implements.
pub struct Log {
    state: Mutex<LogState>,
    global_level: AtomicU8,
    next_target_id: AtomicU64,
}

static GLOBAL: OnceLock<Log> = OnceLock::new();

impl Log {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LogState {
                targets: Vec::new(),
                header: Box::new(TimestampHeader),
                scratch: String::new(),
            }),
            global_level: AtomicU8::new(Severity::Info as u8),
            next_target_id: AtomicU64::new(0),
        }
    }

    /// The process-wide singleton, lazily constructed on first touch.
    /// First touch from more than one thread concurrently is not supported;
    /// touch it once from `main` before spawning producer threads if that
    /// matters to your process.
    pub fn global() -> &'static Log {
        GLOBAL.get_or_init(Log::new)
    }

    pub fn set_global_level(&self, level: Severity) {
        self.global_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn global_level(&self) -> Severity {
        Severity::from_u8(self.global_level.load(Ordering::Relaxed))
    }

    /// `level <= global_level`, i.e. "at least as severe as the threshold".
    pub fn is_writable(&self, level: Severity) -> bool {
        level <= self.global_level()
    }

    /// Registers `sink` as a target; records at or below `min_level` (i.e.
    /// at least that severe) and at or below the global level are written
    /// to it. Returns a guard whose drop deregisters and flushes `sink`.
    pub fn add_target(&self, sink: Box<dyn Sink>, min_level: Severity) -> OutputGuard<'_> {
        let id = self.next_target_id.fetch_add(1, Ordering::Relaxed);
        let mut state = self.state.lock().expect("log mutex poisoned");
        state.targets.push(Target {
            id,
            min_level,
            sink,
        });
        OutputGuard { log: self, id }
    }

    fn remove_target(&self, id: u64) {
        let mut state = self.state.lock().expect("log mutex poisoned");
        if let Some(pos) = state.targets.iter().position(|t| t.id == id) {
            let mut target = state.targets.remove(pos);
            target.sink.flush();
        }
    }

    /// Deregisters and flushes every currently registered target.
    pub fn remove_all_targets(&self) {
        let mut state = self.state.lock().expect("log mutex poisoned");
        for mut target in state.targets.drain(..) {
            target.sink.flush();
        }
    }

    /// Replaces the header writer. `None` reverts to the `Timestamp`
    /// default.
    pub fn set_header(&self, header: Option<Box<dyn HeaderWriter>>) {
        let mut state = self.state.lock().expect("log mutex poisoned");
        state.header = header.unwrap_or_else(|| Box::new(TimestampHeader));
    }

    /// Begins a record at `level`. If `level` exceeds the global threshold
    /// the record is inert: no lock is taken, no buffer is allocated, and
    /// every subsequent write into it is a no-op.
    pub fn record(&self, level: Severity) -> Record<'_> {
        if level > self.global_level() {
            return Record::inert();
        }

        let mut guard = self.state.lock().expect("log mutex poisoned");
        let mut buffer = std::mem::take(&mut guard.scratch);
        buffer.clear();
        let id = level.id_char();
        guard.header.write(&mut buffer, id);

        Record {
            active: Some(ActiveRecord {
                level,
                guard,
                buffer,
            }),
        }
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}
