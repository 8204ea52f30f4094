//! Scripting-runtime discovery for the site directory.
//!
//! The plugin directory lives inside the interpreter's site-packages, so when
//! no site directory is supplied we find the interpreter on `PATH`, ask it for
//! its version, and derive `<prefix>/lib/python<major.minor>/site-packages`.
use crate::error::{InstallError, Result};
use crate::paths::join_under;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Interpreters searched for, in order, when the config does not override them.
pub const DEFAULT_INTERPRETERS: [&str; 2] = ["python3", "python"];

/// Discovery capability used by [`resolve_site_directory`].
pub trait RuntimeLocator {
    /// Find the interpreter executable.
    fn locate(&self) -> Result<PathBuf>;

    /// Run the interpreter's version query and return its raw output.
    fn version_output(&self, exe: &Path) -> Result<String>;
}

/// Locator backed by the real `PATH` and subprocesses.
#[derive(Debug, Clone)]
pub struct SystemLocator {
    interpreters: Vec<String>,
}

impl SystemLocator {
    pub fn new(interpreters: Vec<String>) -> Self {
        Self { interpreters }
    }
}

impl Default for SystemLocator {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETERS.iter().map(|s| s.to_string()).collect())
    }
}

impl RuntimeLocator for SystemLocator {
    fn locate(&self) -> Result<PathBuf> {
        for name in &self.interpreters {
            match which::which(name) {
                Ok(path) => {
                    tracing::debug!(interpreter = %name, path = %path.display(), "interpreter found");
                    return Ok(path);
                }
                Err(err) => tracing::debug!(interpreter = %name, %err, "interpreter not on PATH"),
            }
        }
        Err(InstallError::RuntimeNotFound {
            tried: self.interpreters.join(", "),
        })
    }

    fn version_output(&self, exe: &Path) -> Result<String> {
        let output = Command::new(exe)
            .arg("--version")
            .output()
            .map_err(|err| InstallError::RuntimeVersion {
                path: exe.to_path_buf(),
                detail: err.to_string(),
            })?;
        if !output.status.success() {
            return Err(InstallError::RuntimeVersion {
                path: exe.to_path_buf(),
                detail: format!("exited with {}", output.status),
            });
        }
        Ok(version_text(&output.stdout, &output.stderr))
    }
}

/// Return the site directory, discovering the runtime only if `override_dir`
/// is `None`. An override is returned untouched and never validated.
pub fn resolve_site_directory(
    override_dir: Option<&Path>,
    locator: &dyn RuntimeLocator,
) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    let exe = locator.locate()?;
    let output = locator.version_output(&exe)?;
    let tag = version_tag(&output).ok_or_else(|| InstallError::RuntimeVersion {
        path: exe.clone(),
        detail: format!("unrecognized version output {:?}", output.trim()),
    })?;
    let prefix = runtime_prefix(&exe)?;
    let site = site_packages_dir(prefix, &tag);
    tracing::debug!(
        exe = %exe.display(),
        version = %tag,
        site = %site.display(),
        "resolved site directory"
    );
    Ok(site)
}

/// Pick the stream carrying the version: stdout, or stderr when stdout is
/// empty (Python 2 prints its version on stderr). Warnings the interpreter
/// writes to stderr alongside a stdout version are ignored.
pub fn version_text(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    if stdout.trim().is_empty() {
        String::from_utf8_lossy(stderr).into_owned()
    } else {
        stdout.into_owned()
    }
}

/// Extract `<major>.<minor>` from interpreter version output.
///
/// Uses the first token starting with a digit and keeps its first two
/// `.`-separated parts. Suffixes are not interpreted: `3.12.0rc1` -> `3.12`.
/// Output without such a token yields `None`.
pub fn version_tag(output: &str) -> Option<String> {
    let token = output
        .lines()
        .flat_map(str::split_whitespace)
        .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))?;
    Some(token.split('.').take(2).collect::<Vec<_>>().join("."))
}

/// Installation prefix of an interpreter: the directory above its `bin/`.
pub fn runtime_prefix(exe: &Path) -> Result<&Path> {
    exe.parent()
        .and_then(Path::parent)
        .filter(|prefix| !prefix.as_os_str().is_empty())
        .ok_or_else(|| InstallError::RuntimePrefix(exe.to_path_buf()))
}

/// `<prefix>/lib/python<tag>/site-packages`
pub fn site_packages_dir(prefix: &Path, tag: &str) -> PathBuf {
    let rel = format!("lib/python{tag}/site-packages");
    join_under(None, [prefix, Path::new(&rel)])
}
