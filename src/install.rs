//! File-level install and removal actions.
//!
//! Each installed file is copied into a temp file in its destination
//! directory, given mode 0644, and renamed over the target.
use crate::config::{InstallConfig, SourceArtifacts};
use crate::error::{InstallError, Result};
use crate::paths::InstallTargets;
use serde::Serialize;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const FILE_MODE: u32 = 0o644;

/// One artifact and where it lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallItem {
    pub label: &'static str,
    pub src: PathBuf,
    pub dst: PathBuf,
}

/// The three artifacts in install order: man page, configuration, plugin.
pub fn install_items(
    config: &InstallConfig,
    sources: &SourceArtifacts,
    targets: &InstallTargets,
) -> Vec<InstallItem> {
    vec![
        InstallItem {
            label: "man page",
            src: sources.man_page_gz_path(config),
            dst: targets.man_dir.join(config.man_page_gz()),
        },
        InstallItem {
            label: "configuration",
            src: sources.conf_path(config),
            dst: targets.conf_dir.join(&config.conf_file),
        },
        InstallItem {
            label: "plugin",
            src: sources.plugin_path(config),
            dst: targets.plugin_dir.join(&config.plugin_file),
        },
    ]
}

/// Fail on the first missing source before anything is written.
pub fn ensure_sources(items: &[InstallItem]) -> Result<()> {
    ensure_files(items.iter().map(|item| item.src.as_path()))
}

/// Fail with [`InstallError::MissingArtifact`] on the first path that is not a file.
pub fn ensure_files<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Result<()> {
    match paths.into_iter().find(|path| !path.is_file()) {
        Some(path) => Err(InstallError::MissingArtifact(path.to_path_buf())),
        None => Ok(()),
    }
}

/// Copy `src` to `dst` with [`FILE_MODE`], creating parent directories.
pub fn install_file(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_file() {
        return Err(InstallError::MissingArtifact(src.to_path_buf()));
    }
    let copy_err =
        |err: io::Error| InstallError::from_copy(src.to_path_buf(), dst.to_path_buf(), err);
    let parent = dst
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(copy_err)?;
    let tmp = NamedTempFile::new_in(parent).map_err(copy_err)?;
    fs::copy(src, tmp.path()).map_err(copy_err)?;
    fs::set_permissions(tmp.path(), fs::Permissions::from_mode(FILE_MODE)).map_err(copy_err)?;
    tmp.persist(dst).map_err(|err| copy_err(err.error))?;
    Ok(())
}

/// Remove an installed file. Returns `false` if it was already absent.
pub fn remove_installed(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            Err(InstallError::PermissionDenied {
                path: path.to_path_buf(),
                source: err,
            })
        }
        Err(err) => Err(InstallError::RemoveFailed {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}
