//! Install target layout.
//!
//! Centralizing path construction keeps every command (install, uninstall,
//! paths) pointed at the same three directories.
use crate::error::Result;
use crate::runtime::{resolve_site_directory, RuntimeLocator};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Man pages are installed under `<prefix>/` + this directory.
pub const MAN_SECTION_REL: &str = "share/man/man8";
pub const DEFAULT_PREFIX: &str = "/usr/local";

/// Join `segments` underneath `root`.
///
/// Unlike `PathBuf::join`, an absolute segment is appended below the
/// accumulated path instead of replacing it, so `("/staging", "/usr")`
/// yields `/staging/usr`. Empty segments and `.` components are dropped.
pub fn join_under<'a, I>(root: Option<&Path>, segments: I) -> PathBuf
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut out = root
        .filter(|root| !root.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_default();
    for segment in segments {
        for component in segment.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    if out.as_os_str().is_empty() {
                        out.push(component.as_os_str());
                    }
                }
                Component::CurDir => {}
                Component::ParentDir | Component::Normal(_) => out.push(component.as_os_str()),
            }
        }
    }
    out
}

/// Inputs that decide where artifacts land.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Staging root (`DESTDIR`); `None` installs into the live system.
    pub root: Option<PathBuf>,
    pub prefix: PathBuf,
    /// Pre-supplied site directory (`PYTHONSITES`); skips runtime discovery.
    pub site_dir: Option<PathBuf>,
    /// Package manager name, e.g. `dnf`.
    pub tool: String,
}

/// Resolved directories for the three installed artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallTargets {
    pub man_dir: PathBuf,
    pub conf_dir: PathBuf,
    pub plugin_dir: PathBuf,
}

impl Layout {
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// `<root>/<prefix>/share/man/man8`
    pub fn man_dir(&self) -> PathBuf {
        join_under(
            self.root(),
            [self.prefix.as_path(), Path::new(MAN_SECTION_REL)],
        )
    }

    /// `<root>/etc/<tool>/plugins`. The prefix does not apply here.
    pub fn conf_dir(&self) -> PathBuf {
        let rel = format!("/etc/{}/plugins", self.tool);
        join_under(self.root(), [Path::new(&rel)])
    }

    /// `<root>/<site>/<tool>-plugins` for an already resolved site directory.
    pub fn plugin_dir_in(&self, site_dir: &Path) -> PathBuf {
        let subdir = format!("{}-plugins", self.tool);
        join_under(self.root(), [site_dir, Path::new(&subdir)])
    }
}

/// Compute all three target directories, discovering the runtime only when
/// no site directory was supplied.
pub fn compute_targets(layout: &Layout, locator: &dyn RuntimeLocator) -> Result<InstallTargets> {
    let site_dir = resolve_site_directory(layout.site_dir.as_deref(), locator)?;
    Ok(InstallTargets {
        man_dir: layout.man_dir(),
        conf_dir: layout.conf_dir(),
        plugin_dir: layout.plugin_dir_in(&site_dir),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::tests::FakeLocator;

    fn layout(root: Option<&str>, site: Option<&str>) -> Layout {
        Layout {
            root: root.map(PathBuf::from),
            prefix: PathBuf::from(DEFAULT_PREFIX),
            site_dir: site.map(PathBuf::from),
            tool: "dnf".to_string(),
        }
    }

    #[test]
    fn join_appends_absolute_segments_under_root() {
        let joined = join_under(
            Some(Path::new("/staging")),
            [Path::new("/usr/local"), Path::new("share/man")],
        );
        assert_eq!(joined, PathBuf::from("/staging/usr/local/share/man"));
    }

    #[test]
    fn join_without_root_keeps_leading_slash() {
        let joined = join_under(None, [Path::new("/usr"), Path::new("lib")]);
        assert_eq!(joined, PathBuf::from("/usr/lib"));

        let joined = join_under(Some(Path::new("")), [Path::new("/etc/dnf")]);
        assert_eq!(joined, PathBuf::from("/etc/dnf"));
    }

    #[test]
    fn join_drops_empty_and_dot_segments() {
        let joined = join_under(
            Some(Path::new("/r")),
            [Path::new(""), Path::new("./a//b/"), Path::new(".")],
        );
        assert_eq!(joined, PathBuf::from("/r/a/b"));
    }

    #[test]
    fn staged_targets_with_site_override() {
        let locator = FakeLocator::missing();
        let targets = compute_targets(&layout(Some("/staging"), Some("/x")), &locator).unwrap();
        assert_eq!(
            targets,
            InstallTargets {
                man_dir: PathBuf::from("/staging/usr/local/share/man/man8"),
                conf_dir: PathBuf::from("/staging/etc/dnf/plugins"),
                plugin_dir: PathBuf::from("/staging/x/dnf-plugins"),
            }
        );
        assert_eq!(locator.calls(), 0);
    }

    #[test]
    fn conf_dir_ignores_prefix() {
        let mut layout = layout(None, Some("/x"));
        layout.prefix = PathBuf::from("/opt/kp");
        assert_eq!(layout.conf_dir(), PathBuf::from("/etc/dnf/plugins"));
        assert_eq!(layout.man_dir(), PathBuf::from("/opt/kp/share/man/man8"));
    }

    #[test]
    fn discovered_site_dir_feeds_plugin_dir() {
        let locator = FakeLocator::found("/usr/bin/python3", "Python 3.11.2\n");
        let targets = compute_targets(&layout(None, None), &locator).unwrap();
        assert_eq!(
            targets.plugin_dir,
            PathBuf::from("/usr/lib/python3.11/site-packages/dnf-plugins")
        );
    }

    #[test]
    fn missing_runtime_aborts_target_computation() {
        let locator = FakeLocator::missing();
        let err = compute_targets(&layout(Some("/staging"), None), &locator).unwrap_err();
        assert!(matches!(
            err,
            crate::error::InstallError::RuntimeNotFound { .. }
        ));
    }
}
