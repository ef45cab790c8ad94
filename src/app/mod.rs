pub mod config;
pub mod initialization;
pub mod logging_system;
pub mod notice;
pub mod report;
pub mod service;

pub use config::{Command, Config, ConfigError, LogFormat, LogLevel, OutputFormat};
pub use initialization::InitializationError;
pub use logging_system::{LoggingSystem, setup_logging_safe};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use report::Report;
pub use service::{PatrolService, ScanView, Selection, ViewRow};

use crate::domain::PatrolError;
use anyhow::Context;
use std::process::ExitCode;
use tracing::{debug, info};

/// Everything the shell needs to print after one command.
#[derive(Debug)]
pub struct RunOutcome {
    pub output: String,
    pub notices: Vec<Notice>,
}

impl RunOutcome {
    /// False when a warning or error notice was raised.
    pub fn is_success(&self) -> bool {
        !self
            .notices
            .iter()
            .any(|notice| notice.level >= NoticeLevel::Warning)
    }
}

pub struct App {
    config: Config,
    service: PatrolService,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, PatrolError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::from_args_and_env(args)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let service = PatrolService::new(config.data_files());
        Self { config, service }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(mut self) -> Result<RunOutcome, PatrolError> {
        let command = self.config.command();
        info!(
            command = command.name(),
            scan_file = %self.config.scan_file.display(),
            snapshot_file = %self.config.snapshot_file.display(),
            allowlist_file = %self.config.allowlist_file.display(),
            "Running wi-patrol v{}",
            crate::VERSION
        );

        let view = self.service.run(&command)?;
        let notices = self.service.take_notices();
        let report = Report::new(command.name(), &view, &notices);

        let output = match self.config.output {
            OutputFormat::Table => report.to_table(),
            OutputFormat::Json => report.to_json()?,
        };
        debug!(rows = view.rows.len(), notices = notices.len(), "Rendered report");

        Ok(RunOutcome { output, notices })
    }
}

// Main entry point for the application
pub fn main() -> anyhow::Result<ExitCode> {
    let config = match Config::from_args_and_env(std::env::args_os()) {
        Ok(config) => config,
        // Help, version and usage errors print themselves and pick the exit code
        Err(ConfigError::Cli(e)) => e.exit(),
        Err(e) => return Err(e).context("Failed to load configuration"),
    };

    setup_logging_safe(config.log_level, config.log_format, &config.log_directives)
        .context("Failed to initialize logging")?;

    let output_format = config.output;
    let outcome = App::from_config(config).run()?;

    print!("{}", outcome.output);
    if output_format == OutputFormat::Table {
        for notice in &outcome.notices {
            eprintln!("{notice}");
        }
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
