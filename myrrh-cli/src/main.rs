/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use args::{Args, Mode};
use config::{DemoConfig, PolicyKind};
use myrrh::log::{Log, OutputGuard, Severity};
use myrrh::policy::{recipes, Policy};
use myrrh::{crit, debug, error, info, notify, trace, warn};

mod args;
mod config;

fn main() {
    if let Err(err) = run() {
        eprintln!("myrrh-cli: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.config_path)
        .with_context(|| format!("failed to read configuration file '{}'", args.config_path))?;
    let config: DemoConfig =
        toml::from_str(&raw).with_context(|| "failed to parse configuration")?;

    let log = Log::global();
    log.set_global_level(parse_severity(&config.global_level)?);

    let mut targets: Vec<(String, PathBuf, OutputGuard<'static>)> = Vec::new();
    for policy_config in &config.policies {
        let policy = build_policy(&policy_config.kind)
            .with_context(|| format!("failed to build policy '{}'", policy_config.name))?;
        let path = policy.current_path();
        let guard = log.add_target(Box::new(policy), Severity::Trace);
        targets.push((policy_config.name.clone(), path, guard));
    }

    match args.mode {
        Mode::Demo { count } => {
            for _ in 0..count {
                crit!("a critical record");
                error!("an error record");
                warn!("a warning record");
                notify!("a notify record");
                info!("an info record");
                debug!("a debug record");
                trace!("a trace record");
            }
            println!(
                "emitted {count} record(s) at every severity across {} target(s)",
                targets.len()
            );
        }
        Mode::Tail { policy } => {
            let (_, path, _) = targets
                .iter()
                .find(|(name, _, _)| *name == policy)
                .with_context(|| format!("no policy named '{policy}' in configuration"))?;
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            print!("{contents}");
        }
    }

    Ok(())
}

fn parse_severity(level: &str) -> anyhow::Result<Severity> {
    Ok(match level.to_ascii_lowercase().as_str() {
        "crit" => Severity::Crit,
        "error" => Severity::Error,
        "warn" => Severity::Warn,
        "notify" => Severity::Notify,
        "info" => Severity::Info,
        "debug" => Severity::Debug,
        "trace" => Severity::Trace,
        other => anyhow::bail!("unknown severity level '{other}'"),
    })
}

fn build_policy(kind: &PolicyKind) -> anyhow::Result<Policy> {
    match kind {
        PolicyKind::SizeRestricted { path, max_bytes } => {
            let (parent, leaf) = split_path(path)?;
            let mut built = myrrh::policy::Path::with_parent(parent);
            built.add_text(&leaf)?;
            Ok(recipes::size_restricted_log(built, *max_bytes))
        }
        PolicyKind::SizeRestrictedRotating {
            path_prefix,
            max_bytes,
        } => {
            let (parent, leaf_prefix) = split_path(path_prefix)?;
            let mut built = myrrh::policy::Path::with_parent(parent);
            built.add_text(&leaf_prefix)?;
            built.add_part(myrrh::policy::PathPart::index())?;
            built.add_text(".log")?;
            Ok(recipes::size_restricted_logs(built, *max_bytes))
        }
        PolicyKind::DatedFolder {
            parent_dir,
            leaf_name,
        } => Ok(recipes::dated_folder_log(parent_dir, leaf_name)?),
    }
}

/// Splits a `parent/leaf` string into its directory and file-name parts, the
/// way `myrrh::policy::Path` wants them: a fixed parent plus a rotatable
/// leaf.
fn split_path(path: &str) -> anyhow::Result<(PathBuf, String)> {
    let as_path = Path::new(path);
    let parent = as_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let leaf = as_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("path '{path}' has no file name"))?
        .to_string_lossy()
        .into_owned();
    Ok((parent, leaf))
}
