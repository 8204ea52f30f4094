//! Build step: produce the compressed man page next to its source.
use super::InstallContext;
use crate::cli::BuildArgs;
use crate::compress::compress_man_page;
use anyhow::{Context, Result};

pub fn run_build(args: &BuildArgs) -> Result<()> {
    let ctx = InstallContext::from_args(&args.layout)?;
    build_man_page(&ctx)?;
    Ok(())
}

/// Compress the man page, replacing any previous build output.
pub(super) fn build_man_page(ctx: &InstallContext) -> Result<()> {
    let src = ctx.sources.man_page_path(&ctx.config);
    let dst = ctx.sources.man_page_gz_path(&ctx.config);
    compress_man_page(&src, &dst).with_context(|| format!("build {}", dst.display()))?;
    println!("wrote {}", dst.display());
    Ok(())
}
