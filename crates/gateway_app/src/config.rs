//! Runtime settings, loaded from a RON file and overridden by CLI flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use gateway_engine::{EngineConfig, FetchSettings, DEFAULT_USER_AGENT};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::logging::LogDestination;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportConfig {
    Serial { path: String, baud_rate: u32 },
    Tcp { listen: String },
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig::Serial {
            path: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub transport: TransportConfig,
    /// Pause after every write so a slow device can keep up.
    pub write_delay_ms: u64,
    /// Pause between `CONNECT` and the first menu.
    pub connect_delay_ms: u64,
    /// How long a single read waits for input.
    pub poll_timeout_ms: u64,
    pub idle_sleep_ms: u64,
    pub feed_timeout_secs: u64,
    pub page_timeout_secs: u64,
    pub user_agent: String,
    pub max_page_bytes: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            write_delay_ms: 50,
            connect_delay_ms: 500,
            poll_timeout_ms: 100,
            idle_sleep_ms: 10,
            feed_timeout_secs: 10,
            page_timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_page_bytes: 2 * 1024 * 1024,
            log_level: "info".to_string(),
            log_destination: LogDestination::Both,
            log_file: PathBuf::from("./gateway.log"),
        }
    }
}

impl GatewayConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GatewayConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.level_filter()?;
        Ok(config)
    }

    /// Loads the file named on the command line (if any) and applies the flags on top.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(cli))
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(listen) = &cli.tcp {
            self.transport = TransportConfig::Tcp {
                listen: listen.clone(),
            };
        }
        if let Some(path) = &cli.serial {
            let baud_rate = match &self.transport {
                TransportConfig::Serial { baud_rate, .. } => *baud_rate,
                TransportConfig::Tcp { .. } => 9600,
            };
            self.transport = TransportConfig::Serial {
                path: path.clone(),
                baud_rate,
            };
        }
        if let (Some(baud), TransportConfig::Serial { baud_rate, .. }) =
            (cli.baud, &mut self.transport)
        {
            *baud_rate = baud;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if let Some(file) = &cli.log_file {
            self.log_file = file.clone();
            self.log_destination = LogDestination::Both;
        }
        self
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn engine_config(&self) -> EngineConfig {
        let base = FetchSettings {
            user_agent: self.user_agent.clone(),
            max_bytes: self.max_page_bytes,
            ..FetchSettings::default()
        };
        EngineConfig {
            feed: FetchSettings {
                request_timeout: Duration::from_secs(self.feed_timeout_secs),
                ..base.clone()
            },
            page: FetchSettings {
                request_timeout: Duration::from_secs(self.page_timeout_secs),
                ..base
            },
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            write_delay: Duration::from_millis(self.write_delay_ms),
            connect_delay: Duration::from_millis(self.connect_delay_ms),
            idle_sleep: Duration::from_millis(self.idle_sleep_ms),
        }
    }
}

/// Pacing used by the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub write_delay: Duration,
    pub connect_delay: Duration,
    pub idle_sleep: Duration,
}

impl Timing {
    pub fn immediate() -> Self {
        Self {
            write_delay: Duration::ZERO,
            connect_delay: Duration::ZERO,
            idle_sleep: Duration::ZERO,
        }
    }
}
