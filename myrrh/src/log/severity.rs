/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Log record severity, totally ordered from most to least severe. Lower
/// numeric value means more severe, matching the discriminant order below:
/// `Crit < Error < Warn < Notify < Info < Debug < Trace`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Crit = 0,
    Error = 1,
    Warn = 2,
    Notify = 3,
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl Severity {
    /// The single-character id written into each record's header.
    pub fn id_char(self) -> char {
        match self {
            Severity::Crit => 'C',
            Severity::Error => 'E',
            Severity::Warn => 'W',
            Severity::Notify => 'N',
            Severity::Info => 'I',
            Severity::Debug => 'D',
            Severity::Trace => 'T',
        }
    }

    pub(crate) fn from_u8(value: u8) -> Severity {
        match value {
            0 => Severity::Crit,
            1 => Severity::Error,
            2 => Severity::Warn,
            3 => Severity::Notify,
            4 => Severity::Info,
            5 => Severity::Debug,
            _ => Severity::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_totally_ordered_most_to_least_severe() {
        assert!(Severity::Crit < Severity::Error);
        assert!(Severity::Error < Severity::Warn);
        assert!(Severity::Warn < Severity::Notify);
        assert!(Severity::Notify < Severity::Info);
        assert!(Severity::Info < Severity::Debug);
        assert!(Severity::Debug < Severity::Trace);
    }

    #[test]
    fn each_severity_has_a_distinct_single_char_id() {
        let all = [
            Severity::Crit,
            Severity::Error,
            Severity::Warn,
            Severity::Notify,
            Severity::Info,
            Severity::Debug,
            Severity::Trace,
        ];
        let mut seen = std::collections::HashSet::new();
        for s in all {
            assert!(seen.insert(s.id_char()));
        }
    }

    #[test]
    fn from_u8_round_trips_through_the_discriminant() {
        for value in 0u8..=6 {
            assert_eq!(Severity::from_u8(value) as u8, value);
        }
    }
}
