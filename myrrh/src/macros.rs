/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Call-site macros over `Log::global()`. Each expands to the construction
//! and (same-statement) destruction of exactly one `Record`, matching the
//! data model's "constructed/destroyed on same logical statement" lifetime.

/// Emits a `Crit`-severity record to the process-wide log.
#[macro_export]
macro_rules! crit {
    ($($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let mut record = $crate::log::Log::global().record($crate::log::Severity::Crit);
        let _ = write!(record, $($arg)*);
    }};
}

/// Emits an `Error`-severity record to the process-wide log.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let mut record = $crate::log::Log::global().record($crate::log::Severity::Error);
        let _ = write!(record, $($arg)*);
    }};
}

/// Emits a `Warn`-severity record to the process-wide log.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let mut record = $crate::log::Log::global().record($crate::log::Severity::Warn);
        let _ = write!(record, $($arg)*);
    }};
}

/// Emits a `Notify`-severity record to the process-wide log.
#[macro_export]
macro_rules! notify {
    ($($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let mut record = $crate::log::Log::global().record($crate::log::Severity::Notify);
        let _ = write!(record, $($arg)*);
    }};
}

/// Emits an `Info`-severity record to the process-wide log.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let mut record = $crate::log::Log::global().record($crate::log::Severity::Info);
        let _ = write!(record, $($arg)*);
    }};
}

/// Emits a `Debug`-severity record to the process-wide log.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let mut record = $crate::log::Log::global().record($crate::log::Severity::Debug);
        let _ = write!(record, $($arg)*);
    }};
}

/// Emits a `Trace`-severity record to the process-wide log. Compiled out
/// entirely (the macro body is a no-op, not merely filtered at runtime)
/// when the crate is built with the `compile-out-trace` feature.
#[cfg(not(feature = "compile-out-trace"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{
        use ::std::fmt::Write as _;
        let mut record = $crate::log::Log::global().record($crate::log::Severity::Trace);
        let _ = write!(record, $($arg)*);
    }};
}

#[cfg(feature = "compile-out-trace")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}
