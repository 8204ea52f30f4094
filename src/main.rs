use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod compress;
mod config;
mod error;
mod install;
mod paths;
mod plugin_conf;
mod runtime;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.command.layout().verbose);

    match &args.command {
        Command::Build(args) => workflow::run_build(args),
        Command::Install(args) => workflow::run_install(args),
        Command::Paths(args) => workflow::run_paths(args),
        Command::Check(args) => workflow::run_check(args),
        Command::Uninstall(args) => workflow::run_uninstall(args),
    }
}

/// Log to stderr so `paths --json` output stays machine-readable.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "plugin_install=debug"
    } else {
        "plugin_install=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
