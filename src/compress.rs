//! Man page compression.
//!
//! Compression is delegated to the host `gzip`. Output is written to a temp
//! file beside the destination and only renamed into place when gzip exits
//! cleanly, so a failed run never leaves a truncated `.gz` behind.
use crate::error::{InstallError, Result};
use crate::install::FILE_MODE;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use tempfile::NamedTempFile;

pub const GZIP: &str = "gzip";

/// Compress `src` into `dst`, replacing any previous output.
pub fn compress_man_page(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_file() {
        return Err(InstallError::MissingArtifact(src.to_path_buf()));
    }
    let failed = |detail: String| InstallError::CompressionFailed {
        path: src.to_path_buf(),
        detail,
    };
    let gzip = which::which(GZIP).map_err(|err| failed(format!("{GZIP} not found: {err}")))?;

    let dir = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)
        .map_err(|err| failed(format!("create temp file in {}: {err}", dir.display())))?;
    let out = tmp
        .reopen()
        .map_err(|err| failed(format!("open temp file: {err}")))?;

    let start = Instant::now();
    // -n keeps the original name and mtime out of the header.
    let output = Command::new(&gzip)
        .args(["-n", "-9", "-c"])
        .arg(src)
        .stdin(Stdio::null())
        .stdout(Stdio::from(out))
        .output()
        .map_err(|err| failed(format!("run {}: {err}", gzip.display())))?;
    let elapsed_ms = start.elapsed().as_millis();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = match stderr.trim().lines().next() {
            Some(line) if !line.is_empty() => line.to_string(),
            _ => format!("status {}", output.status),
        };
        return Err(failed(detail));
    }

    // The temp file is created 0600; match what `gzip -c > file` leaves.
    fs::set_permissions(tmp.path(), fs::Permissions::from_mode(FILE_MODE))
        .map_err(|err| failed(format!("chmod temp file: {err}")))?;
    tmp.persist(dst)
        .map_err(|err| failed(format!("rename into {}: {}", dst.display(), err.error)))?;
    tracing::info!(
        src = %src.display(),
        dst = %dst.display(),
        elapsed_ms,
        "compressed man page"
    );
    Ok(())
}

/// Whether `dst` must be rebuilt from `src`: it is missing, or older than
/// its source. Unreadable timestamps count as stale.
pub fn needs_rebuild(src: &Path, dst: &Path) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|meta| meta.modified());
    match (modified(src), modified(dst)) {
        (Ok(src_time), Ok(dst_time)) => dst_time < src_time,
        _ => true,
    }
}
