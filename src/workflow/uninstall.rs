//! Uninstall step: remove the files `install` would write.
use super::InstallContext;
use crate::cli::UninstallArgs;
use crate::install::{install_items, remove_installed};
use anyhow::{Context, Result};

pub fn run_uninstall(args: &UninstallArgs) -> Result<()> {
    let ctx = InstallContext::from_args(&args.layout)?;
    let targets = ctx.targets()?;
    for item in install_items(&ctx.config, &ctx.sources, &targets) {
        if args.dry_run {
            tracing::info!(what = item.label, path = %item.dst.display(), "would remove");
            continue;
        }
        let removed = remove_installed(&item.dst)
            .with_context(|| format!("uninstall {}", item.label))?;
        if removed {
            tracing::info!(what = item.label, path = %item.dst.display(), "removed");
            println!("removed {}", item.dst.display());
        } else {
            tracing::debug!(path = %item.dst.display(), "already absent");
        }
    }
    Ok(())
}
