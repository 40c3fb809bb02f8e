/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};

use crate::error::{Error, Result};

/// Computes a byte offset inside an open file without disturbing the file's
/// read position, even when scanning fails.
///
/// The `FromStart`/`FromEnd` variants always land on either the file's end
/// or the byte immediately following a `\n` — callers rely on this to keep
/// line-aligned ranges out of `PartialCopy`/`FileResize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionScanner {
    Start,
    End,
    FromStartByLines(u64),
    FromEndByLines(u64),
}

impl PositionScanner {
    /// Scans `file` and returns the byte offset this variant describes.
    /// Restores the file's prior read position before returning, including
    /// on the error path.
    pub fn scan(&self, file: &mut File) -> Result<u64> {
        let original_pos = file
            .stream_position()
            .map_err(|_| Error::NotOpen("input file".to_owned()))?;

        let result = self.do_scan(file);

        // Best-effort restore; if this fails the file is in worse trouble
        // than our bookkeeping, but we must not mask the scan's own result.
        let _ = file.seek(SeekFrom::Start(original_pos));

        result
    }

    fn do_scan(&self, file: &mut File) -> Result<u64> {
        let size = file.metadata()?.len();

        match *self {
            PositionScanner::Start => Ok(0),
            PositionScanner::End => Ok(size),
            PositionScanner::FromStartByLines(p) => Self::from_start(file, size, p),
            PositionScanner::FromEndByLines(k) => {
                if k >= size {
                    Ok(size)
                } else {
                    Self::from_start(file, size, size - k)
                }
            }
        }
    }

    fn from_start(file: &mut File, size: u64, p: u64) -> Result<u64> {
        if p >= size {
            return Ok(size);
        }

        file.seek(SeekFrom::Start(p))?;
        let mut reader = BufReader::new(&*file);
        let mut discard = Vec::new();
        let consumed = reader.read_until(b'\n', &mut discard)?;

        if consumed == 0 {
            // read_until hit EOF without a newline.
            return Ok(size);
        }

        let ends_in_newline = discard.last() == Some(&b'\n');
        if !ends_in_newline {
            return Ok(size);
        }

        Ok(p + consumed as u64)
    }
}
