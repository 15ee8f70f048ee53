use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Everything the engine needs to know about the server, fixed for the engine's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Ask the server to keep this player's session alive across reconnects.
    pub persistent: bool,
    pub registration: RetryPolicy,
    pub lobby_poll: PollPolicy,
}

/// Bounded retry with a fixed pause between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

/// Unbounded polling with a fixed interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollPolicy {
    pub interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 8080,
            persistent: false,
            registration: RetryPolicy::default(),
            lobby_poll: PollPolicy::default(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            backoff_ms: 1000,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

impl RetryPolicy {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl PollPolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl ClientConfig {
    /// Reads a JSON config file. Keys that are left out keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file '{}'", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        Ok(config)
    }
}

/// Command line arguments shared by all bots.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// The preferred name of the bot. The server picks another one if it is taken
    pub name: String,

    /// Server host name [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Server port [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Ask the server to keep the session alive across reconnects [default: false]
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub persistent: Option<bool>,

    /// Path to a JSON config file; command line values take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(persistent) = self.persistent {
            config.persistent = persistent;
        }
        Ok(config)
    }
}

pub fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestArgs {
        #[command(flatten)]
        connection: ConnectionArgs,
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"host": "kerfuffle.example", "registration": {"max_attempts": 3, "backoff_ms": 10}}"#)
                .unwrap();
        assert_eq!(config.host, "kerfuffle.example");
        assert_eq!(config.port, 8080);
        assert_eq!(config.registration.max_attempts, 3);
        assert_eq!(config.registration.backoff(), Duration::from_millis(10));
        assert_eq!(config.lobby_poll.interval(), Duration::from_secs(1));
    }

    #[test]
    fn command_line_overrides_defaults() {
        let args = TestArgs::parse_from(["bot", "right_bot", "--port", "9000", "--persistent"]);
        assert_eq!(args.connection.name, "right_bot");
        let config = args.connection.client_config().unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9000);
        assert!(config.persistent);
        assert_eq!(config.registration, RetryPolicy::default());
    }

    #[test]
    fn command_line_overrides_config_file() {
        let path = std::env::temp_dir().join(format!("kerfuffle-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"host": "kerfuffle.example", "persistent": true}"#).unwrap();
        let path_arg = path.to_str().unwrap();

        let args = TestArgs::parse_from(["bot", "right_bot", "--config", path_arg]);
        let config = args.connection.client_config().unwrap();
        assert_eq!(config.host, "kerfuffle.example");
        assert!(config.persistent);

        let args = TestArgs::parse_from(["bot", "right_bot", "--config", path_arg, "--persistent", "false"]);
        let config = args.connection.client_config().unwrap();
        assert_eq!(config.host, "kerfuffle.example");
        assert!(!config.persistent);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = TestArgs::parse_from(["bot", "right_bot", "--config", "/nonexistent/kerfuffle.json"]);
        let err = args.connection.client_config().unwrap_err();
        assert!(err.to_string().contains("Could not read config file"));
    }
}
