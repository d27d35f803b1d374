#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;

/// Reference date every CLI session is pinned to.
pub const TODAY: &str = "2024-06-10";

/// Isolated CLI harness: a private data directory and a frozen clock.
pub struct ScriptSession {
    pub home: TempDir,
}

impl ScriptSession {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("create temp home"),
        }
    }

    /// Builds a script-mode invocation that reads `lines` from stdin.
    pub fn command(&self, lines: &[&str]) -> Command {
        let mut input = lines.join("\n");
        input.push('\n');

        let mut cmd = Command::cargo_bin("cycle_picker_cli").expect("binary built");
        cmd.env("CYCLE_PICKER_CLI_SCRIPT", "1")
            .env("CYCLE_PICKER_HOME", self.home.path())
            .env("CYCLE_PICKER_TODAY", TODAY)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .write_stdin(input);
        cmd
    }

    /// Runs `lines` and returns captured stdout.
    pub fn stdout(&self, lines: &[&str]) -> String {
        let output = self.command(lines).output().expect("run cli");
        assert!(output.status.success(), "cli exited with {:?}", output.status);
        String::from_utf8(output.stdout).expect("utf-8 stdout")
    }
}
