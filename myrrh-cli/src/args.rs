/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file in TOML format
    #[arg(long, default_value_t = String::from("./myrrh.toml"))]
    pub config_path: String,

    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
#[clap(rename_all = "kebab_case")]
pub enum Mode {
    /// Wire up every configured policy and emit a record at each severity
    Demo {
        /// How many records to emit at each severity
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },
    /// Print the file a named policy is currently writing to
    Tail {
        /// Policy name, matching a `[[policies]]` entry in the config file
        #[arg(short, long)]
        policy: String,
    },
}
