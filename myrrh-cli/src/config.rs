/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct DemoConfig {
    /// `crit`, `error`, `warn`, `notify`, `info`, `debug`, or `trace`.
    #[serde(default = "default_global_level")]
    pub global_level: String,
    pub policies: Vec<PolicyConfig>,
}

fn default_global_level() -> String {
    "info".to_owned()
}

#[derive(Deserialize, Clone)]
pub struct PolicyConfig {
    /// Name used to address this policy from the `tail` subcommand.
    pub name: String,
    #[serde(flatten)]
    pub kind: PolicyKind,
}

#[derive(Deserialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyKind {
    /// A single file that rotates by cropping itself once it would exceed
    /// `max_bytes`.
    SizeRestricted { path: String, max_bytes: u64 },
    /// A rotating family of files, each capped at `max_bytes`.
    SizeRestrictedRotating {
        path_prefix: String,
        max_bytes: u64,
    },
    /// One file per calendar day under `parent_dir`.
    DatedFolder {
        parent_dir: String,
        leaf_name: String,
    },
}
