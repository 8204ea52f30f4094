//! Check step: make sure the build directory holds installable artifacts.
use super::InstallContext;
use crate::cli::CheckArgs;
use crate::error::InstallError;
use crate::plugin_conf::{check_plugin_conf, MAIN_SECTION};
use anyhow::{Context, Result};

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let ctx = InstallContext::from_args(&args.layout)?;
    let (config, sources) = (&ctx.config, &ctx.sources);

    for path in [sources.plugin_path(config), sources.man_page_path(config)] {
        if !path.is_file() {
            return Err(InstallError::MissingArtifact(path).into());
        }
    }

    let conf = sources.conf_path(config);
    let sections = check_plugin_conf(&conf).context("check plugin configuration")?;
    let options = sections.get(MAIN_SECTION).map_or(0, |main| main.len());
    tracing::info!(conf = %conf.display(), options, "plugin configuration ok");
    println!("ok: {}", sources.root().display());
    Ok(())
}
