//! Install step.
//!
//! Targets, the plugin configuration, and the sources are all checked before
//! anything is written, so a failed check leaves the filesystem untouched.
use super::build::build_man_page;
use super::InstallContext;
use crate::cli::InstallArgs;
use crate::compress::needs_rebuild;
use crate::install::{ensure_files, ensure_sources, install_file, install_items};
use crate::plugin_conf::check_plugin_conf;
use anyhow::{Context, Result};

pub fn run_install(args: &InstallArgs) -> Result<()> {
    let ctx = InstallContext::from_args(&args.layout)?;
    let targets = ctx.targets()?;

    let conf = ctx.sources.conf_path(&ctx.config);
    check_plugin_conf(&conf).context("check plugin configuration")?;
    let plugin = ctx.sources.plugin_path(&ctx.config);
    let man_src = ctx.sources.man_page_path(&ctx.config);
    ensure_files([plugin.as_path(), man_src.as_path()]).context("check sources")?;

    // `install` depends on `all`: rebuild the man page when missing or stale.
    let man_gz = ctx.sources.man_page_gz_path(&ctx.config);
    if needs_rebuild(&man_src, &man_gz) {
        if args.dry_run {
            tracing::info!(dst = %man_gz.display(), "would build man page");
        } else {
            build_man_page(&ctx)?;
        }
    }

    let items = install_items(&ctx.config, &ctx.sources, &targets);
    if !args.dry_run {
        ensure_sources(&items)?;
    }
    for item in &items {
        if args.dry_run {
            tracing::info!(
                what = item.label,
                src = %item.src.display(),
                dst = %item.dst.display(),
                "would install"
            );
            continue;
        }
        install_file(&item.src, &item.dst)
            .with_context(|| format!("install {}", item.label))?;
        tracing::info!(what = item.label, dst = %item.dst.display(), "installed");
        println!("installed {}", item.dst.display());
    }
    Ok(())
}
