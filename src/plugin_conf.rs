//! Structural check of the plugin configuration file.
//!
//! The plugin reads an INI file through the package manager's config parser
//! and looks up boolean options in `[main]`. A file that parser would reject,
//! or a boolean it cannot read, silently disables the plugin at runtime, so
//! it is caught here before installation.
use crate::error::{InstallError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const MAIN_SECTION: &str = "main";
/// Options the plugin and the loader read from `[main]`, all booleans.
pub const BOOLEAN_OPTIONS: [&str; 3] = ["enabled", "autoupdate", "autofilter"];

const TRUE_WORDS: [&str; 4] = ["1", "yes", "true", "on"];
const FALSE_WORDS: [&str; 4] = ["0", "no", "false", "off"];

/// Parsed `section -> key -> value` view of an INI file.
pub type Sections = BTreeMap<String, BTreeMap<String, String>>;

/// Interpret a value the way the loader's `getboolean` does.
pub fn parse_bool(value: &str) -> Option<bool> {
    let lower = value.trim().to_ascii_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Parse INI text. Keys are lowercased, matching the loader.
pub fn parse_sections(path: &Path, text: &str) -> Result<Sections> {
    let invalid = |line: usize, detail: String| InstallError::InvalidPluginConf {
        path: path.to_path_buf(),
        line,
        detail,
    };
    let mut sections = Sections::new();
    let mut current: Option<String> = None;
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| invalid(line_no, format!("malformed section header {line:?}")))?;
            if sections.contains_key(name) {
                return Err(invalid(line_no, format!("duplicate section [{name}]")));
            }
            sections.insert(name.to_string(), BTreeMap::new());
            current = Some(name.to_string());
            continue;
        }
        let Some(section) = current.as_ref() else {
            return Err(invalid(line_no, "option outside of any section".to_string()));
        };
        let split = line
            .find(['=', ':'])
            .ok_or_else(|| invalid(line_no, format!("expected key = value, got {line:?}")))?;
        let key = line[..split].trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(invalid(line_no, "empty option name".to_string()));
        }
        let value = line[split + 1..].trim().to_string();
        if let Some(options) = sections.get_mut(section) {
            options.insert(key, value);
        }
    }
    Ok(sections)
}

/// Read and check a plugin configuration file.
pub fn check_plugin_conf(path: &Path) -> Result<Sections> {
    let text = fs::read_to_string(path).map_err(|err| InstallError::InvalidPluginConf {
        path: path.to_path_buf(),
        line: 0,
        detail: err.to_string(),
    })?;
    let sections = parse_sections(path, &text)?;
    let main = sections
        .get(MAIN_SECTION)
        .ok_or_else(|| InstallError::InvalidPluginConf {
            path: path.to_path_buf(),
            line: 0,
            detail: format!("missing [{MAIN_SECTION}] section"),
        })?;
    for (key, value) in main {
        if BOOLEAN_OPTIONS.contains(&key.as_str()) {
            if parse_bool(value).is_none() {
                return Err(InstallError::InvalidPluginConf {
                    path: path.to_path_buf(),
                    line: line_of(&text, key),
                    detail: format!("{key} must be a boolean (got {value:?})"),
                });
            }
        } else {
            tracing::warn!(path = %path.display(), option = %key, "unknown option in [main]");
        }
    }
    Ok(sections)
}

fn line_of(text: &str, key: &str) -> usize {
    text.lines()
        .position(|line| {
            line.trim()
                .to_ascii_lowercase()
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with(['=', ':']))
        })
        .map_or(0, |idx| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_conf(text: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kpatch.conf");
        fs::write(&path, text).unwrap();
        (temp, path)
    }

    #[test]
    fn accepts_shipped_layout() {
        let (_temp, path) = write_conf("[main]\nenabled=1\nautoupdate = False\n# autofilter\n");
        let sections = check_plugin_conf(&path).unwrap();
        assert_eq!(sections["main"]["enabled"], "1");
        assert_eq!(sections["main"]["autoupdate"], "False");
    }

    #[test]
    fn bool_vocabulary_matches_loader() {
        for word in ["1", "YES", "true", "On"] {
            assert_eq!(parse_bool(word), Some(true), "{word}");
        }
        for word in ["0", "no", "FALSE", "off"] {
            assert_eq!(parse_bool(word), Some(false), "{word}");
        }
        assert_eq!(parse_bool("enabled"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn bad_boolean_points_at_line() {
        let (_temp, path) = write_conf("[main]\nenabled=1\nautofilter: maybe\n");
        match check_plugin_conf(&path) {
            Err(InstallError::InvalidPluginConf { line, detail, .. }) => {
                assert_eq!(line, 3);
                assert!(detail.contains("autofilter"));
            }
            other => panic!("expected InvalidPluginConf, got {other:?}"),
        }
    }

    #[test]
    fn missing_main_section_is_rejected() {
        let (_temp, path) = write_conf("[other]\nenabled=1\n");
        let err = check_plugin_conf(&path).unwrap_err();
        assert!(err.to_string().contains("missing [main] section"));
    }

    #[test]
    fn option_before_section_is_rejected() {
        let (_temp, path) = write_conf("enabled=1\n[main]\n");
        match check_plugin_conf(&path) {
            Err(InstallError::InvalidPluginConf { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected InvalidPluginConf, got {other:?}"),
        }
    }

    #[test]
    fn malformed_lines_are_rejected() {
        let path = Path::new("kpatch.conf");
        assert!(parse_sections(path, "[main\n").is_err());
        assert!(parse_sections(path, "[main]\njust words\n").is_err());
        assert!(parse_sections(path, "[main]\n= 1\n").is_err());
        assert!(parse_sections(path, "[main]\n[main]\n").is_err());
    }

    #[test]
    fn unknown_options_are_tolerated() {
        let (_temp, path) = write_conf("[main]\nenabled=1\nflavor=vanilla\n");
        let sections = check_plugin_conf(&path).unwrap();
        assert_eq!(sections["main"]["flavor"], "vanilla");
    }
}
