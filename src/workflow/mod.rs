//! Command implementations.
//!
//! Each step resolves an [`InstallContext`] from the CLI inputs and layers
//! its filesystem actions on top of the computed targets.
mod build;
mod check;
mod context;
mod install;
mod paths;
mod uninstall;

pub use build::run_build;
pub use check::run_check;
pub use context::InstallContext;
pub use install::run_install;
pub use paths::run_paths;
pub use uninstall::run_uninstall;
