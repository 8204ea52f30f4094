//! CLI argument parsing for the plugin installer.
//!
//! Layout inputs follow the usual make conventions (`DESTDIR`, `PREFIX`,
//! `PYTHONSITES`) so packaging recipes can drive the installer through the
//! environment.
use crate::paths::DEFAULT_PREFIX;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "plugin-install",
    version,
    about = "Build and install a dnf plugin into its loader's directory layout",
    after_help = "Examples:\n  plugin-install build\n  plugin-install install --destdir /tmp/stage\n  PYTHONSITES=/usr/lib/python3.11/site-packages plugin-install paths --json\n  plugin-install uninstall --dry-run",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(visible_alias = "all")]
    Build(BuildArgs),
    Install(InstallArgs),
    Paths(PathsArgs),
    Check(CheckArgs),
    Uninstall(UninstallArgs),
}

impl Command {
    pub fn layout(&self) -> &LayoutArgs {
        match self {
            Command::Build(args) => &args.layout,
            Command::Install(args) => &args.layout,
            Command::Paths(args) => &args.layout,
            Command::Check(args) => &args.layout,
            Command::Uninstall(args) => &args.layout,
        }
    }
}

/// Inputs shared by every command.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Staging root prepended to every install path
    #[arg(long, env = "DESTDIR", value_name = "DIR")]
    pub destdir: Option<PathBuf>,

    /// Install prefix for man pages
    #[arg(long, env = "PREFIX", value_name = "DIR", default_value = DEFAULT_PREFIX)]
    pub prefix: PathBuf,

    /// Interpreter site directory; skips interpreter discovery when set
    #[arg(long, env = "PYTHONSITES", value_name = "DIR")]
    pub site_dir: Option<PathBuf>,

    /// Directory holding the plugin, configuration, and man page sources
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Installer config (defaults to <source-dir>/plugin-install.json if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Build inputs.
#[derive(Parser, Debug)]
#[command(about = "Compress the man page")]
pub struct BuildArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Install inputs.
#[derive(Parser, Debug)]
#[command(about = "Copy the plugin, configuration, and man page into place")]
pub struct InstallArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Log each action without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

/// Paths inputs.
#[derive(Parser, Debug)]
#[command(about = "Print the computed install directories")]
pub struct PathsArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Check inputs.
#[derive(Parser, Debug)]
#[command(about = "Verify source artifacts and the plugin configuration")]
pub struct CheckArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Uninstall inputs.
#[derive(Parser, Debug)]
#[command(about = "Remove installed plugin files")]
pub struct UninstallArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Log each removal without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}
