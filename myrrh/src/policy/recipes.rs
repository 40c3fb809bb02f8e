/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Ready-made `Policy` constructors for the common rotation shapes. These
//! are convenience wrappers over `Policy::new` plus the primitives in this
//! module; they introduce no invariants beyond what those primitives
//! already guarantee.

use crate::error::Result;
use crate::policy::opener::Opener;
use crate::policy::path::Path;
use crate::policy::path_part::PathPart;
use crate::policy::policy::Policy;
use crate::policy::restriction::{Restriction, RestrictionStore};

/// A single file that rotates by cropping itself to its trailing half once
/// it would exceed `max_bytes`: `Appender` initial open, `Resizer(max_bytes
/// / 2)` subsequent, guarded by a `Size(max_bytes)` restriction.
pub fn size_restricted_log(path: Path, max_bytes: u64) -> Policy {
    let mut restrictions = RestrictionStore::new();
    restrictions.add(Restriction::size(max_bytes));
    Policy::new(
        path,
        Opener::Appender,
        Opener::Resizer(max_bytes / 2),
        restrictions,
    )
}

/// A rotating family of files, each capped at `max_bytes`: `Appender`
/// initial open (to resume an interrupted run), `Creator` subsequent (a
/// brand new file every rotation). `path` should include a part that varies
/// across rotations (`PathPart::time()` or `PathPart::index()`) or every
/// rotation will collide on the same generated name.
pub fn size_restricted_logs(path: Path, max_bytes: u64) -> Policy {
    let mut restrictions = RestrictionStore::new();
    restrictions.add(Restriction::size(max_bytes));
    Policy::new(path, Opener::Appender, Opener::Creator, restrictions)
}

/// One file per calendar day, at `parent_dir/YYYYMMDD/leaf_name`. Rotation
/// is driven entirely by the `Date` part's own `DateChanged` restriction,
/// installed automatically by `Policy::new`; no extra restriction is
/// needed.
pub fn dated_folder_log(parent_dir: &str, leaf_name: &str) -> Result<Policy> {
    let mut path = Path::with_parent(parent_dir);
    path.add_part(PathPart::date())?;
    path.add_part(PathPart::folder())?;
    path.add_part(PathPart::text(leaf_name)?)?;

    Ok(Policy::new(
        path,
        Opener::Appender,
        Opener::Creator,
        RestrictionStore::new(),
    ))
}

/// As `size_restricted_log`, except the file lives under a subfolder named
/// after the current date (`parent_dir/YYYYMMDD/leaf_name`): both the
/// `Date` part's own `DateChanged` restriction and the caller's
/// `Size(max_bytes)` restriction can trigger rotation, and either one
/// reopens via `Resizer(max_bytes / 2)`.
pub fn size_restricted_dated_folder_log(
    parent_dir: &str,
    leaf_name: &str,
    max_bytes: u64,
) -> Result<Policy> {
    let mut path = Path::with_parent(parent_dir);
    path.add_part(PathPart::date())?;
    path.add_part(PathPart::folder())?;
    path.add_part(PathPart::text(leaf_name)?)?;

    let mut restrictions = RestrictionStore::new();
    restrictions.add(Restriction::size(max_bytes));

    Ok(Policy::new(
        path,
        Opener::Appender,
        Opener::Resizer(max_bytes / 2),
        restrictions,
    ))
}

/// As `size_restricted_logs`, except every rotation's file lives under a
/// subfolder named after the current date:
/// `parent_dir/YYYYMMDD/leaf_prefix<time><leaf_postfix>`. Both the `Date`
/// restriction and the caller's `Size(max_bytes)` restriction can trigger
/// rotation into a fresh `Creator`-opened file.
pub fn size_restricted_dated_folder_logs(
    parent_dir: &str,
    leaf_prefix: &str,
    leaf_postfix: &str,
    max_bytes: u64,
) -> Result<Policy> {
    let mut path = Path::with_parent(parent_dir);
    path.add_part(PathPart::date())?;
    path.add_part(PathPart::folder())?;
    path.add_part(PathPart::text(leaf_prefix)?)?;
    path.add_part(PathPart::time())?;
    path.add_part(PathPart::text(leaf_postfix)?)?;

    let mut restrictions = RestrictionStore::new();
    restrictions.add(Restriction::size(max_bytes));

    Ok(Policy::new(
        path,
        Opener::Appender,
        Opener::Creator,
        restrictions,
    ))
}
