/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The file-rotation policy engine: path generation and matching (`path`,
//! `path_part`), rotation conditions (`restriction`), file-opening
//! strategies (`opener`), and their composition into a single
//! write-accepting sink (`policy`). `recipes` packages the common
//! combinations as ready-made constructors.

pub mod opener;
pub mod path;
pub mod path_part;
pub mod policy;
pub mod recipes;
pub mod restriction;

pub use opener::{FileHandle, Opener};
pub use path::{Entity, Path};
pub use path_part::PathPart;
pub use policy::Policy;
pub use restriction::{Restriction, RestrictionStore};
