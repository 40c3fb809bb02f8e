/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! A process-local logging substrate with a configurable file-rotation
//! policy.
//!
//! Three layers, leaves first:
//! - [`file`] — exception-safe file primitives (`ScopedEraser`,
//!   `PositionScanner`, `PartialCopy`, `SafeRewrite`, `resize_file`).
//! - [`policy`] — the rotation policy engine (`Path`, `PathPart`,
//!   `Restriction`, `Opener`, `Policy`, and ready-made `recipes`).
//! - [`log`] — the process-wide log front end (`Log`, `Record`,
//!   `OutputGuard`, `Severity`, `HeaderWriter`, `Sink`).
//!
//! Setup-path operations (building a `Path`, constructing a `Policy`, the
//! file primitives) return [`error::Result`] and fail fast. The logging hot
//! path — `Record` construction through `Sink::write_line` — never raises;
//! a misconfigured or unwritable sink silently drops its writes.

pub mod error;
pub mod file;
pub mod log;
pub mod macros;
pub mod policy;

mod scenarios_tests;
mod tests_support;

pub use error::{Error, Result};
