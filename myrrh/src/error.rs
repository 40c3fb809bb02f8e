/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use thiserror::Error;

/// Setup-path errors. Never raised from the logging hot path (record
/// construction through sink write); those boundaries absorb failures and
/// report progress through return values instead, per the no-throw contract.
#[derive(Error, Debug)]
pub enum Error {
    #[error("file is not open: {0}")]
    NotOpen(String),

    #[error("scan produced an out-of-range byte span: start={start} end={end}")]
    OutOfRange { start: u64, end: u64 },

    #[error("text path part may not contain a folder separator: {0:?}")]
    IllegalText(String),

    #[error("path rule violation: {0}")]
    PathRuleViolation(String),

    #[error("filesystem operation failed: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("failed to mark path read-only: {0}")]
    SetReadOnlyFailed(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
