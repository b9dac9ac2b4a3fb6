#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Address nothing listens on, so AI calls fail fast.
pub const UNREACHABLE_AI_URL: &str = "http://127.0.0.1:9";

/// Creates a `Command` for the `asoka` binary with a clean environment and
/// its data directory at `data_dir`.
pub fn base_asoka_command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("asoka").expect("asoka binary not built");
    configure_asoka_command(&mut cmd, data_dir);
    cmd
}

/// Applies the standard isolated environment to an existing `Command`.
pub fn configure_asoka_command(cmd: &mut Command, data_dir: &Path) {
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd.env("HOME", "/tmp")
        .env("ASOKA_DATA_DIR", data_dir)
        .env("ASOKA_AI_BASE_URL", UNREACHABLE_AI_URL);
}
