//! Doctor command implementation
//!
//! Checks configuration and the working directory without calling the
//! speech service.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::process::ExitCode;

use voxdub_studio::config::{
    API_KEY_VARS, BASE_URL_VAR, TEXT_MODEL_VAR, TIMEOUT_VAR, TTS_MODEL_VAR, VOICE_VAR,
};
use voxdub_studio::{ConfigError, Settings};

use super::json_output::{error_codes, CommandOutput, JsonError};

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Fail,
}

/// One line of the doctor report.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// Section the check belongs to
    pub section: &'static str,
    /// Result
    pub status: CheckStatus,
    /// What was found
    pub message: String,
}

impl Check {
    fn new(section: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            section,
            status,
            message: message.into(),
        }
    }
}

/// Doctor report.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    /// CLI version
    pub version: &'static str,
    /// All checks, in display order
    pub checks: Vec<Check>,
}

impl DoctorReport {
    /// True when no check failed.
    pub fn all_ok(&self) -> bool {
        self.checks.iter().all(|c| c.status != CheckStatus::Fail)
    }
}

/// Runs the configuration checks against a variable lookup.
pub fn check_configuration<F>(lookup: F) -> Vec<Check>
where
    F: Fn(&str) -> Option<String>,
{
    let mut checks = Vec::new();
    let is_set = |name: &str| lookup(name).is_some_and(|v| !v.trim().is_empty());

    match API_KEY_VARS.iter().find(|name| is_set(name)) {
        Some(name) => checks.push(Check::new(
            "Credentials",
            CheckStatus::Ok,
            format!("API key found in {name}"),
        )),
        None => checks.push(Check::new(
            "Credentials",
            CheckStatus::Fail,
            format!("No API key (set one of {})", API_KEY_VARS.join(", ")),
        )),
    }

    match Settings::from_lookup(&lookup) {
        Ok(settings) => {
            checks.push(Check::new(
                "Settings",
                CheckStatus::Ok,
                format!("endpoint {}", settings.base_url),
            ));
            checks.push(Check::new(
                "Settings",
                CheckStatus::Ok,
                format!(
                    "text model {}, speech model {}",
                    settings.text_model, settings.tts_model
                ),
            ));
            checks.push(Check::new(
                "Settings",
                CheckStatus::Ok,
                format!(
                    "voice {}, timeout {}s",
                    settings.voice,
                    settings.timeout.as_secs()
                ),
            ));
        }
        // Already reported under credentials.
        Err(ConfigError::MissingApiKey) => {}
        Err(err) => checks.push(Check::new("Settings", CheckStatus::Fail, err.to_string())),
    }

    for name in [BASE_URL_VAR, TEXT_MODEL_VAR, TTS_MODEL_VAR, VOICE_VAR, TIMEOUT_VAR] {
        if is_set(name) {
            checks.push(Check::new(
                "Overrides",
                CheckStatus::Ok,
                format!("{name} is set"),
            ));
        }
    }

    checks
}

/// Checks that voiceovers can be written into `dir`.
pub fn check_writable(dir: &Path) -> Check {
    let test_file = dir.join(".voxdub_write_test");
    match std::fs::write(&test_file, "test") {
        Ok(()) => {
            let _ = std::fs::remove_file(&test_file);
            Check::new(
                "Permissions",
                CheckStatus::Ok,
                format!("Current directory is writable ({})", dir.display()),
            )
        }
        Err(e) => Check::new(
            "Permissions",
            CheckStatus::Fail,
            format!("Cannot write to current directory: {e}"),
        ),
    }
}

/// Run the doctor command
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(json_output: bool) -> Result<ExitCode> {
    let mut checks = check_configuration(|name| env::var(name).ok());
    match env::current_dir() {
        Ok(dir) => checks.push(check_writable(&dir)),
        Err(e) => checks.push(Check::new(
            "Permissions",
            CheckStatus::Fail,
            format!("Cannot determine current directory: {e}"),
        )),
    }

    let report = DoctorReport {
        version: env!("CARGO_PKG_VERSION"),
        checks,
    };
    let all_ok = report.all_ok();

    if json_output {
        let errors = report
            .checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .map(|c| JsonError::new(error_codes::CONFIG, c.message.clone()))
            .collect();
        CommandOutput::partial(report, errors).print()?;
    } else {
        print_human(&report);
    }

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_human(report: &DoctorReport) {
    println!("{}", "voxdub Doctor".cyan().bold());
    println!("{}", "=============".cyan());
    println!();
    println!("{}", "Versions:".bold());
    println!("  {} voxdub-cli v{}", "->".green(), report.version);

    let mut section = "";
    for check in &report.checks {
        if check.section != section {
            section = check.section;
            println!();
            println!("{}", format!("{section}:").bold());
        }
        let mark = match check.status {
            CheckStatus::Ok => "ok".green(),
            CheckStatus::Fail => "!!".red(),
        };
        println!("  {} {}", mark, check.message);
    }
    println!();

    if report.all_ok() {
        println!("{} All checks passed!", "SUCCESS".green().bold());
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
    }
}
