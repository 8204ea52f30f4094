//! Installer configuration.
//!
//! Artifact names and the interpreter search list come from an optional JSON
//! file; layout inputs (destdir, prefix, site dir) come from flags or the
//! environment and always win.
use crate::runtime::DEFAULT_INTERPRETERS;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Current schema version for the installer config file.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Config file picked up from the source directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "plugin-install.json";

fn default_tool() -> String {
    "dnf".to_string()
}

fn default_plugin_file() -> String {
    "kpatch.py".to_string()
}

fn default_conf_file() -> String {
    "kpatch.conf".to_string()
}

fn default_man_page() -> String {
    "dnf-kpatch.8".to_string()
}

fn default_interpreters() -> Vec<String> {
    DEFAULT_INTERPRETERS.iter().map(|s| s.to_string()).collect()
}

/// Names of the plugin artifacts and the package manager they target.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InstallConfig {
    pub schema_version: u32,
    /// Package manager the plugin extends; names `/etc/<tool>` and `<tool>-plugins`.
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default = "default_plugin_file")]
    pub plugin_file: String,
    #[serde(default = "default_conf_file")]
    pub conf_file: String,
    /// Uncompressed man page source; installed as `<man_page>.gz`.
    #[serde(default = "default_man_page")]
    pub man_page: String,
    #[serde(default = "default_interpreters")]
    pub interpreters: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            tool: default_tool(),
            plugin_file: default_plugin_file(),
            conf_file: default_conf_file(),
            man_page: default_man_page(),
            interpreters: default_interpreters(),
        }
    }
}

impl InstallConfig {
    /// File name of the compressed man page.
    pub fn man_page_gz(&self) -> String {
        format!("{}.gz", self.man_page)
    }
}

/// Load the config from `explicit`, else from the source dir, else defaults.
pub fn load_config(explicit: Option<&Path>, source_dir: &Path) -> Result<InstallConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = source_dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                tracing::debug!("no config file; using defaults");
                return Ok(InstallConfig::default());
            }
            candidate
        }
    };
    let config = read_config(&path)?;
    validate_config(&config).with_context(|| format!("validate config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn read_config(path: &Path) -> Result<InstallConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: InstallConfig =
        serde_json::from_slice(&bytes).context("parse installer config JSON")?;
    Ok(config)
}

/// Validate schema version and artifact names.
pub fn validate_config(config: &InstallConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    validate_file_name(&config.tool, "tool")?;
    validate_file_name(&config.plugin_file, "plugin_file")?;
    validate_file_name(&config.conf_file, "conf_file")?;
    validate_file_name(&config.man_page, "man_page")?;
    if config.interpreters.is_empty() {
        return Err(anyhow!("interpreters must list at least one name"));
    }
    for name in &config.interpreters {
        validate_file_name(name, "interpreters")?;
    }
    Ok(())
}

/// Names are joined onto install directories, so they must be one plain component.
fn validate_file_name(value: &str, label: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{label} must be non-empty"));
    }
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !value.contains('/') => Ok(()),
        _ => Err(anyhow!("{label} must be a plain file name (got {value:?})")),
    }
}

/// Source artifact locations inside the build directory.
#[derive(Debug, Clone)]
pub struct SourceArtifacts {
    root: PathBuf,
}

impl SourceArtifacts {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn plugin_path(&self, config: &InstallConfig) -> PathBuf {
        self.root.join(&config.plugin_file)
    }

    pub fn conf_path(&self, config: &InstallConfig) -> PathBuf {
        self.root.join(&config.conf_file)
    }

    pub fn man_page_path(&self, config: &InstallConfig) -> PathBuf {
        self.root.join(&config.man_page)
    }

    /// Build output of the compression step.
    pub fn man_page_gz_path(&self, config: &InstallConfig) -> PathBuf {
        self.root.join(config.man_page_gz())
    }
}
