/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The process-wide log front end: the `Log` sink itself, its severity
//! levels, the per-call-site `Record` builder, the `OutputGuard` returned
//! from registration, the line header writer, and the `Sink` trait that
//! registered targets implement.

mod header;
mod log_impl;
mod output_guard;
mod record;
mod severity;
mod sink;

pub use header::{HeaderWriter, TimestampHeader};
pub use log_impl::Log;
pub use output_guard::OutputGuard;
pub use record::Record;
pub use severity::Severity;
pub use sink::{BufferSink, FailingSink, Sink, WriterSink};
