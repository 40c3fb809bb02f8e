/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use chrono::{Datelike, Local, Timelike};

/// Writes the per-line prefix ahead of a record's payload. The prefix must
/// never contain a newline; `Log` appends the record body and terminating
/// `\n` itself.
pub trait HeaderWriter: Send + Sync {
    fn write(&self, out: &mut String, id: char);
}

/// The default header: `YYYY.MM.DD HH:MM:SS:SSSSSS <id> ` with
/// microsecond-precision fractional seconds.
pub struct TimestampHeader;

impl HeaderWriter for TimestampHeader {
    fn write(&self, out: &mut String, id: char) {
        let now = Local::now();
        out.push_str(&format!(
            "{:04}.{:02}.{:02} {:02}:{:02}:{:02}:{:06} {} ",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
            now.timestamp_subsec_micros(),
            id
        ));
    }
}

impl<F> HeaderWriter for F
where
    F: Fn(&mut String, char) + Send + Sync,
{
    fn write(&self, out: &mut String, id: char) {
        self(out, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_header_never_embeds_a_newline() {
        let mut out = String::new();
        TimestampHeader.write(&mut out, 'I');
        assert!(!out.contains('\n'));
        assert!(out.ends_with("I "));
    }

    #[test]
    fn custom_header_closure_is_used_verbatim() {
        let header: Box<dyn HeaderWriter> =
            Box::new(|out: &mut String, id: char| out.push_str(&format!("[{}] ", id)));
        let mut out = String::new();
        header.write(&mut out, 'W');
        assert_eq!(out, "[W] ");
    }
}
