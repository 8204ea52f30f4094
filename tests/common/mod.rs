//! Shared test infrastructure for integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const CONF_TEXT: &str = "[main]\nenabled=1\nautoupdate=False\nautofilter=False\n";
pub const PLUGIN_TEXT: &str = "# kpatch dnf plugin\nimport dnf\n";
pub const MAN_TEXT: &str = ".TH DNF-KPATCH 8\n.SH NAME\ndnf-kpatch \\- kpatch plugin\n";

/// A build directory with plugin sources plus an empty staging root.
pub struct TestFixture {
    pub temp: TempDir,
}

impl TestFixture {
    pub fn setup() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let fixture = Self { temp };
        fs::create_dir_all(fixture.source_dir()).expect("create source dir");
        fs::create_dir_all(fixture.stage_dir()).expect("create stage dir");
        fs::write(fixture.source_dir().join("kpatch.py"), PLUGIN_TEXT).expect("write plugin");
        fs::write(fixture.source_dir().join("kpatch.conf"), CONF_TEXT).expect("write conf");
        fs::write(fixture.source_dir().join("dnf-kpatch.8"), MAN_TEXT).expect("write man page");
        fixture
    }

    pub fn source_dir(&self) -> PathBuf {
        self.temp.path().join("src")
    }

    pub fn stage_dir(&self) -> PathBuf {
        self.temp.path().join("stage")
    }

    /// Install a fake interpreter at `<prefix>/bin/<name>` printing `version`.
    ///
    /// Returns the `bin` directory for use as `PATH`.
    pub fn fake_interpreter(&self, prefix_rel: &str, name: &str, version: &str) -> PathBuf {
        let bin = self.temp.path().join(prefix_rel).join("bin");
        fs::create_dir_all(&bin).expect("create fake bin");
        let exe = bin.join(name);
        fs::write(&exe, format!("#!/bin/sh\necho '{version}'\n")).expect("write fake interpreter");
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).expect("chmod");
        bin
    }

    /// Run the installer from the source dir with layout env vars cleared,
    /// then `envs` applied.
    pub fn run(&self, args: &[&str], envs: &[(&str, &Path)]) -> Output {
        let bin = env!("CARGO_BIN_EXE_plugin-install");
        let mut cmd = Command::new(bin);
        cmd.args(args)
            .arg("--source-dir")
            .arg(self.source_dir())
            .env_remove("DESTDIR")
            .env_remove("PREFIX")
            .env_remove("PYTHONSITES")
            .env_remove("RUST_LOG");
        for (key, value) in envs {
            cmd.env(key, value);
        }
        cmd.output().expect("run plugin-install")
    }
}

pub fn host_has(tool: &str) -> bool {
    let Some(path_var) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path_var).any(|dir| dir.join(tool).is_file())
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
