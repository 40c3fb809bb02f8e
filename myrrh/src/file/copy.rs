/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{Error, Result};
use crate::file::scanner::PositionScanner;

const CHUNK_SIZE: usize = 64 * 1024;

/// Copies bytes `[start, end)` of an input file to an output file, where
/// `start`/`end` are computed by a pair of `PositionScanner`s. The input must
/// be opened for binary reads so the copied range is byte-exact.
pub struct PartialCopy {
    start: PositionScanner,
    end: PositionScanner,
}

impl PartialCopy {
    pub fn new(start: PositionScanner, end: PositionScanner) -> Self {
        Self { start, end }
    }

    pub fn copy(&self, input: &mut File, output: &mut File) -> Result<()> {
        let start = self.start.scan(input)?;
        let end = self.end.scan(input)?;

        if end < start {
            return Err(Error::OutOfRange { start, end });
        }

        if end == start {
            return Ok(());
        }

        input.seek(SeekFrom::Start(start))?;
        let mut remaining = end - start;
        let mut buf = [0u8; CHUNK_SIZE];

        while remaining > 0 {
            let want = remaining.min(CHUNK_SIZE as u64) as usize;
            input.read_exact(&mut buf[..want])?;
            output.write_all(&buf[..want])?;
            remaining -= want as u64;
        }

        output.flush()?;
        Ok(())
    }
}
