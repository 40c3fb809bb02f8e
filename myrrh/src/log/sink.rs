/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::io::Write;
use std::sync::Mutex;

use crate::policy::policy::Policy;

/// A byte-oriented target registered with `Log`. `write_line` receives a
/// fully formatted record, header and trailing newline already included.
/// Implementations must never panic or propagate errors from either method:
/// per the no-throw contract, a failing sink simply drops the write.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str);
    fn flush(&mut self);
}

/// Adapts any `std::io::Write` (a file, stderr, an in-memory buffer) into a
/// `Sink`.
pub struct WriterSink<W>(pub W);

impl<W> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self(writer)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&mut self, line: &str) {
        let _ = self.0.write_all(line.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.0.flush();
    }
}

/// A `Sink` backed by a shared, lockable in-memory buffer, handy for tests
/// that need to inspect exactly what was emitted.
pub struct BufferSink(pub std::sync::Arc<Mutex<Vec<u8>>>);

impl Sink for BufferSink {
    fn write_line(&mut self, line: &str) {
        if let Ok(mut buf) = self.0.lock() {
            buf.extend_from_slice(line.as_bytes());
        }
    }

    fn flush(&mut self) {}
}

/// A `Sink` that always fails, used to exercise the no-throw contract.
pub struct FailingSink;

impl Sink for FailingSink {
    fn write_line(&mut self, _line: &str) {}
    fn flush(&mut self) {}
}

impl Sink for Policy {
    fn write_line(&mut self, line: &str) {
        let _ = self.write(line);
    }

    fn flush(&mut self) {}
}
