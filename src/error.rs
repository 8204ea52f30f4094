//! Error kinds surfaced by path resolution and installation actions.
//!
//! Every variant is fatal; callers wrap these in `anyhow` context at the
//! command layer.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("no interpreter found on PATH (tried: {tried})")]
    RuntimeNotFound { tried: String },

    #[error("could not read interpreter version from {}: {detail}", .path.display())]
    RuntimeVersion { path: PathBuf, detail: String },

    #[error("cannot derive install prefix from interpreter path {}", .0.display())]
    RuntimePrefix(PathBuf),

    #[error("missing artifact {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("copy {} -> {} failed: {source}", .src.display(), .dst.display())]
    CopyFailed {
        src: PathBuf,
        dst: PathBuf,
        source: io::Error,
    },

    #[error("remove {} failed: {source}", .path.display())]
    RemoveFailed { path: PathBuf, source: io::Error },

    #[error("permission denied writing {}", .path.display())]
    PermissionDenied { path: PathBuf, source: io::Error },

    #[error("compression of {} failed: {detail}", .path.display())]
    CompressionFailed { path: PathBuf, detail: String },

    #[error("invalid plugin configuration {}:{line}: {detail}", .path.display())]
    InvalidPluginConf {
        path: PathBuf,
        line: usize,
        detail: String,
    },
}

impl InstallError {
    /// Classify an io failure on `dst` while writing a copy of `src`.
    pub fn from_copy(src: PathBuf, dst: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            InstallError::PermissionDenied { path: dst, source }
        } else {
            InstallError::CopyFailed { src, dst, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;
