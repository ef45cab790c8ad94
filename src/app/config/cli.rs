use super::{
    ConfigError, DEFAULT_ALLOWLIST_FILE, DEFAULT_SCAN_FILE, DEFAULT_SNAPSHOT_FILE,
    INLINE_CONFIG_ENV, LogFormat, LogLevel, OutputFormat,
};
use crate::app::service::Selection;
use crate::store::DataFiles;
use clap::{ArgGroup, Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(
    name = "wi-patrol",
    author,
    version,
    about = "Classify scanned WiFi networks as safe or suspicious",
    long_about = None
)]
#[serde(default)]
pub struct Config {
    /// Scan source file (read only)
    #[arg(long, env = "WI_PATROL_SCAN_FILE", default_value = DEFAULT_SCAN_FILE, global = true)]
    pub scan_file: PathBuf,

    /// Snapshot file, overwritten by refresh and analyze
    #[arg(long, env = "WI_PATROL_SNAPSHOT_FILE", default_value = DEFAULT_SNAPSHOT_FILE, global = true)]
    pub snapshot_file: PathBuf,

    /// Allowlist file, only ever appended to
    #[arg(long, env = "WI_PATROL_ALLOWLIST_FILE", default_value = DEFAULT_ALLOWLIST_FILE, global = true)]
    pub allowlist_file: PathBuf,

    /// Report format
    #[arg(long, env = "WI_PATROL_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", default_value = "compact", global = true)]
    pub log_format: LogFormat,

    /// Extra `target=level` log filter directive (repeatable)
    #[arg(long = "log-directive", value_name = "TARGET=LEVEL", global = true)]
    pub log_directives: Vec<String>,

    /// Configuration file path (optional)
    #[arg(long, env = "CONFIG_FILE", global = true)]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    #[serde(skip)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load and print the scan file (default)
    Show,
    /// Overwrite the snapshot with the current scan
    Refresh,
    /// Classify the scan and persist the snapshot
    Analyze,
    /// Append a scanned network to the allowlist, then analyze
    Allow(AllowArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Show => "show",
            Command::Refresh => "refresh",
            Command::Analyze => "analyze",
            Command::Allow(_) => "allow",
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[command(group(ArgGroup::new("selection").required(true).args(["row", "bssid"])))]
pub struct AllowArgs {
    /// 1-based row number as printed by `show` or `analyze`
    #[arg(long)]
    pub row: Option<usize>,

    /// BSSID of the network (case-insensitive)
    #[arg(long)]
    pub bssid: Option<String>,

    /// Narrow a BSSID match to this SSID (case-insensitive)
    #[arg(long, requires = "bssid", conflicts_with = "row")]
    pub ssid: Option<String>,
}

impl AllowArgs {
    pub fn selection(&self) -> Result<Selection, ConfigError> {
        match (self.row, &self.bssid) {
            (Some(_), None) if self.ssid.is_some() => Err(ConfigError::InvalidConfig(
                "--ssid narrows a --bssid match and cannot be used with --row".to_string(),
            )),
            (Some(row), None) => Ok(Selection::Row(row)),
            (None, Some(bssid)) => Ok(Selection::Network {
                bssid: bssid.clone(),
                ssid: self.ssid.clone(),
            }),
            _ => Err(ConfigError::InvalidConfig(
                "Select a network with either --row or --bssid".to_string(),
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_file: PathBuf::from(DEFAULT_SCAN_FILE),
            snapshot_file: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            allowlist_file: PathBuf::from(DEFAULT_ALLOWLIST_FILE),
            output: OutputFormat::Table,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_directives: Vec::new(),
            config_file: None,
            command: None,
        }
    }
}

impl Config {
    /// Parse CLI arguments (with clap's env fallbacks) and validate.
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::try_parse_from(args)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse CLI arguments, then fill every value left at its default from the
    /// config file (or the inline `WI_PATROL_CONFIG` TOML when no file is set).
    pub fn from_args_and_env<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::try_parse_from(args)?;

        let base = if let Some(config_file) = &config.config_file {
            Some(Self::read_file(config_file)?)
        } else if let Ok(inline) = std::env::var(INLINE_CONFIG_ENV) {
            Some(toml::from_str::<Config>(&inline)?)
        } else {
            None
        };

        let config = match base {
            Some(base) => config.merged_over(base),
            None => config,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    // Values still at their defaults are taken from `base`.
    fn merged_over(mut self, base: Config) -> Self {
        let defaults = Config::default();

        if self.scan_file == defaults.scan_file {
            self.scan_file = base.scan_file;
        }
        if self.snapshot_file == defaults.snapshot_file {
            self.snapshot_file = base.snapshot_file;
        }
        if self.allowlist_file == defaults.allowlist_file {
            self.allowlist_file = base.allowlist_file;
        }
        if self.output == defaults.output {
            self.output = base.output;
        }
        if self.log_level == defaults.log_level {
            self.log_level = base.log_level;
        }
        if self.log_format == defaults.log_format {
            self.log_format = base.log_format;
        }
        if self.log_directives.is_empty() {
            self.log_directives = base.log_directives;
        }
        self
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show)
    }

    pub fn data_files(&self) -> DataFiles {
        DataFiles::new(
            self.scan_file.clone(),
            self.snapshot_file.clone(),
            self.allowlist_file.clone(),
        )
    }
}
