//! Paths step: report where each artifact would be installed.
use super::InstallContext;
use crate::cli::PathsArgs;
use crate::install::{install_items, InstallItem};
use crate::paths::InstallTargets;
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize, Debug)]
struct PathsReport {
    #[serde(flatten)]
    targets: InstallTargets,
    files: Vec<InstallItem>,
}

pub fn run_paths(args: &PathsArgs) -> Result<()> {
    let ctx = InstallContext::from_args(&args.layout)?;
    let targets = ctx.targets()?;
    let files = install_items(&ctx.config, &ctx.sources, &targets);

    if args.json {
        let report = PathsReport { targets, files };
        let text = serde_json::to_string_pretty(&report).context("serialize paths report")?;
        println!("{text}");
        return Ok(());
    }

    println!("man_dir: {}", targets.man_dir.display());
    println!("conf_dir: {}", targets.conf_dir.display());
    println!("plugin_dir: {}", targets.plugin_dir.display());
    for item in &files {
        println!("{}: {} -> {}", item.label, item.src.display(), item.dst.display());
    }
    Ok(())
}
