/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::log::log_impl::Log;

/// A move-only handle returned by `Log::add_target`. Dropping it removes
/// the registration and flushes the sink one last time. Rust's ordinary
/// move semantics already give the "at most one live guard per
/// registration" and "moving leaves the source inert" invariants for free;
/// nothing extra is needed here beyond the `Drop` impl.
pub struct OutputGuard<'a> {
    pub(super) log: &'a Log,
    pub(super) id: u64,
}

impl Drop for OutputGuard<'_> {
    fn drop(&mut self) {
        self.log.remove_target(self.id);
    }
}
