//! Test harness for running the `voxdub` binary and checking its outputs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;
use tempfile::TempDir;

use voxdub_studio::config::{
    API_KEY_VARS, BASE_URL_VAR, TEXT_MODEL_VAR, TIMEOUT_VAR, TTS_MODEL_VAR, VOICE_VAR,
};

use crate::format_validators::{validate_wav, WavInfo};

/// Result of running the voxdub CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }

    /// Parses stdout as a `--json` report.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Runs the voxdub CLI in a scratch directory with a controlled environment.
///
/// Every configuration variable the CLI reads is cleared before each run,
/// so only what the test sets with [`CliHarness::env`] is visible.
pub struct CliHarness {
    /// Working directory for test inputs and outputs.
    pub work_dir: TempDir,
    envs: Vec<(String, String)>,
}

impl CliHarness {
    /// Create a new harness with an empty environment.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
            envs: Vec::new(),
        }
    }

    /// Sets an environment variable for subsequent runs.
    pub fn env(&mut self, name: &str, value: &str) -> &mut Self {
        self.envs.push((name.to_string(), value.to_string()));
        self
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Writes a file into the working directory and returns its path.
    pub fn write_file(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).expect("Failed to write test input");
        path
    }

    /// Run the voxdub CLI with the given arguments.
    pub fn run_cli(&self, args: &[&str]) -> CliResult {
        let mut command = Command::new("cargo");
        command
            .args(["run", "--quiet", "--manifest-path"])
            .arg(workspace_manifest_path())
            .args(["-p", "voxdub-cli", "--bin", "voxdub", "--"])
            .args(args)
            .current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");

        for name in API_KEY_VARS
            .iter()
            .chain(&[BASE_URL_VAR, TEXT_MODEL_VAR, TTS_MODEL_VAR, VOICE_VAR, TIMEOUT_VAR])
        {
            command.env_remove(name);
        }
        for (name, value) in &self.envs {
            command.env(name, value);
        }

        match command.output() {
            Ok(out) => CliResult::from_output(out),
            Err(e) => CliResult {
                success: false,
                exit_code: -1,
                stdout: String::new(),
                stderr: format!("Failed to run CLI: {}", e),
            },
        }
    }
}

fn workspace_manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let manifest_path = manifest_dir.join("..").join("..").join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

impl Default for CliHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a WAV file and return its header fields.
pub fn validate_wav_file(path: &Path) -> Result<WavInfo, String> {
    let data = fs::read(path).map_err(|e| format!("Failed to read file: {}", e))?;
    validate_wav(&data).map_err(|e| e.to_string())
}
