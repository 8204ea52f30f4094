//! Shared state for a single installer invocation.
use crate::cli::LayoutArgs;
use crate::config::{load_config, InstallConfig, SourceArtifacts};
use crate::paths::{compute_targets, InstallTargets, Layout};
use crate::runtime::SystemLocator;
use anyhow::{Context, Result};

/// Config, source artifacts, and layout resolved from CLI/env inputs.
#[derive(Debug, Clone)]
pub struct InstallContext {
    pub config: InstallConfig,
    pub sources: SourceArtifacts,
    pub layout: Layout,
}

impl InstallContext {
    pub fn from_args(args: &LayoutArgs) -> Result<Self> {
        let config = load_config(args.config.as_deref(), &args.source_dir)?;
        let layout = Layout {
            root: args.destdir.clone(),
            prefix: args.prefix.clone(),
            site_dir: args.site_dir.clone(),
            tool: config.tool.clone(),
        };
        Ok(Self {
            sources: SourceArtifacts::new(args.source_dir.clone()),
            config,
            layout,
        })
    }

    pub fn locator(&self) -> SystemLocator {
        SystemLocator::new(self.config.interpreters.clone())
    }

    /// Resolve target directories, discovering the interpreter if needed.
    pub fn targets(&self) -> Result<InstallTargets> {
        compute_targets(&self.layout, &self.locator()).context("resolve install directories")
    }
}
