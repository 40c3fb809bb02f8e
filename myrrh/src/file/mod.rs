/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Exception-safe file primitives used by the rotation policy engine
//! (`crate::policy`): scope-erasing cleanup, line-aligned byte-range
//! scanning, byte-range copy, and transactional in-place rewrite.

pub mod copy;
pub mod eraser;
pub mod safe_rewrite;
pub mod scanner;

pub use copy::PartialCopy;
pub use eraser::ScopedEraser;
pub use safe_rewrite::{resize_file, SafeRewrite};
pub use scanner::PositionScanner;
