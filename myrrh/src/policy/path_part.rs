/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use chrono::{Local, Timelike};

use crate::error::{Error, Result};
use crate::policy::restriction::{Restriction, RestrictionStore};

/// One piece of a generated log file path. Each variant knows how to
/// generate a string for a new path and a regular expression that matches
/// the strings it could have generated, so an `Opener::Appender` can scan a
/// directory and recognize files this policy produced earlier.
#[derive(Clone, Debug)]
pub enum PathPart {
    Text(String),
    Folder,
    Date,
    Time(TimeState),
    Index(u64),
    ProcessId(String),
}

/// Per-instance state backing the `Time` variant: the last time-of-day it
/// generated from, and a tiebreaker counter that resets whenever the clock
/// advances past that point.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeState {
    last_time_of_day: Option<chrono::NaiveTime>,
    tiebreak: u64,
}

impl PathPart {
    pub fn text(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if s.contains('/') || s.contains('\\') {
            return Err(Error::IllegalText(s));
        }
        Ok(PathPart::Text(s))
    }

    pub fn folder() -> Self {
        PathPart::Folder
    }

    pub fn date() -> Self {
        PathPart::Date
    }

    pub fn time() -> Self {
        PathPart::Time(TimeState::default())
    }

    pub fn index() -> Self {
        PathPart::Index(1)
    }

    pub fn process_id() -> Self {
        PathPart::ProcessId(std::process::id().to_string())
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, PathPart::Folder)
    }

    /// Generates a new string usable as this part of a path. Mutates
    /// per-instance counters (`Index`, `Time`); callers only reach this
    /// through `Policy::write`, which serializes access under `Log`'s
    /// write-mutex.
    pub fn generate(&mut self) -> String {
        match self {
            PathPart::Text(s) => s.clone(),
            PathPart::Folder => "/".to_owned(),
            PathPart::Date => Local::now().format("%Y%m%d").to_string(),
            PathPart::Time(state) => state.generate(),
            PathPart::Index(counter) => {
                let value = *counter;
                *counter += 1;
                value.to_string()
            }
            PathPart::ProcessId(pid) => pid.clone(),
        }
    }

    /// Raw (unanchored) regex pattern matching every string this variant
    /// could generate.
    pub fn regex_str(&self) -> String {
        match self {
            PathPart::Text(s) => regex::escape(s),
            PathPart::Folder => "/".to_owned(),
            PathPart::Date => r"\d{4}(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01])".to_owned(),
            PathPart::Time(_) => r"([01]\d|2[0-3])[0-5]\d[0-5]\d-\d{6}-\d+".to_owned(),
            PathPart::Index(_) => r"\d+".to_owned(),
            PathPart::ProcessId(pid) => regex::escape(pid),
        }
    }

    /// True if `left` must be considered to have come earlier than `right`
    /// according to this part's ordering rule. `left`/`right` are substrings
    /// that already matched `regex_str()`.
    pub fn is_earlier(&self, left: &str, right: &str) -> bool {
        match self {
            PathPart::Text(_) | PathPart::ProcessId(_) => false,
            PathPart::Folder | PathPart::Date | PathPart::Time(_) => left < right,
            PathPart::Index(_) => {
                let l: u128 = left.parse().unwrap_or(0);
                let r: u128 = right.parse().unwrap_or(0);
                l < r
            }
        }
    }

    /// Only `Date` contributes a restriction (rotate when the date changes).
    pub fn append_restrictions(&self, store: &mut RestrictionStore) {
        if let PathPart::Date = self {
            store.add(Restriction::date_changed());
        }
    }
}

impl TimeState {
    fn generate(&mut self) -> String {
        let now = Local::now();
        let micros = now.nanosecond() / 1_000;
        // Compared (and stored) at the same microsecond precision the
        // formatted string below carries: comparing the underlying
        // nanosecond-precision clock instead would let two calls that land
        // in the same microsecond but different nanoseconds both reset the
        // tiebreak to 0, producing the exact same string twice.
        let time_of_day = chrono::NaiveTime::from_hms_micro_opt(
            now.hour(),
            now.minute(),
            now.second(),
            micros,
        )
        .unwrap_or_else(|| now.time());

        let tiebreak = match self.last_time_of_day {
            Some(last) if last == time_of_day => {
                self.tiebreak += 1;
                self.tiebreak
            }
            _ => {
                self.tiebreak = 0;
                0
            }
        };
        self.last_time_of_day = Some(time_of_day);

        format!(
            "{:02}{:02}{:02}-{:06}-{}",
            now.hour(),
            now.minute(),
            now.second(),
            micros,
            tiebreak
        )
    }
}

/// Splits a free-form string on `/` and `\`: maximal non-separator runs
/// become `Text` parts, each separator becomes a `Folder` part.
pub fn tokenize(s: &str) -> Vec<PathPart> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch == '/' || ch == '\\' {
            if !current.is_empty() {
                parts.push(PathPart::Text(std::mem::take(&mut current)));
            }
            parts.push(PathPart::Folder);
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        parts.push(PathPart::Text(current));
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn matches(part: &PathPart, generated: &str) -> bool {
        let re = Regex::new(&format!("^{}$", part.regex_str())).unwrap();
        re.is_match(generated)
    }

    #[test]
    fn text_rejects_separators() {
        assert!(PathPart::text("bad/name").is_err());
        assert!(PathPart::text("bad\\name").is_err());
        assert!(PathPart::text("good_name").is_ok());
    }

    #[test]
    fn generate_and_regex_agree_for_every_variant() {
        let mut text = PathPart::text("myrrh").unwrap();
        assert!(matches(&text, &text.generate()));

        let mut folder = PathPart::folder();
        assert!(matches(&folder, &folder.generate()));

        let mut date = PathPart::date();
        assert!(matches(&date, &date.generate()));

        let mut time = PathPart::time();
        assert!(matches(&time, &time.generate()));

        let mut index = PathPart::index();
        assert!(matches(&index, &index.generate()));

        let mut pid = PathPart::process_id();
        assert!(matches(&pid, &pid.generate()));
    }

    #[test]
    fn index_is_monotonic_starting_at_one() {
        let mut index = PathPart::index();
        assert_eq!(index.generate(), "1");
        assert_eq!(index.generate(), "2");
        assert_eq!(index.generate(), "3");
    }

    #[test]
    fn successive_time_generates_are_never_equal() {
        let mut time = PathPart::time();
        let first = time.generate();
        let second = time.generate();
        let third = time.generate();
        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
    }

    #[test]
    fn tokenize_splits_on_both_separator_styles() {
        let parts = tokenize("a/b\\c");
        assert_eq!(parts.len(), 5);
        assert!(matches!(parts[0], PathPart::Text(ref s) if s == "a"));
        assert!(parts[1].is_folder());
        assert!(matches!(parts[2], PathPart::Text(ref s) if s == "b"));
        assert!(parts[3].is_folder());
        assert!(matches!(parts[4], PathPart::Text(ref s) if s == "c"));
    }

    #[test]
    fn tokenize_leading_separator_yields_leading_folder() {
        let parts = tokenize("/a");
        assert!(parts[0].is_folder());
    }
}
