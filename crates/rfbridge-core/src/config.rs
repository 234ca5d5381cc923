use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::link::loopback::LoopbackLink;
use crate::link::udp::UdpLink;
use crate::link::BoxedLink;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// PowerLevel / DataRate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PowerLevel {
    Min,
    Low,
    High,
    #[default]
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataRate {
    #[default]
    Kbps250,
    Mbps1,
    Mbps2,
}

// ---------------------------------------------------------------------------
// RadioSettings
// ---------------------------------------------------------------------------

/// Physical link parameters handed to `RadioLink::configure` once at startup.
/// Defaults mirror the reference deployment: channel 76, 250 kbps, maximum
/// power, pipe addresses `1Node`/`2Node`, 32-byte frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioSettings {
    #[serde(default = "default_channel")]
    pub channel: u8,
    #[serde(default)]
    pub power_level: PowerLevel,
    #[serde(default)]
    pub data_rate: DataRate,
    #[serde(default = "default_read_address")]
    pub read_address: String,
    #[serde(default = "default_write_address")]
    pub write_address: String,
    #[serde(default = "default_frame_size")]
    pub frame_size: usize,
}

fn default_channel() -> u8 {
    76
}

fn default_read_address() -> String {
    "1Node".to_string()
}

fn default_write_address() -> String {
    "2Node".to_string()
}

fn default_frame_size() -> usize {
    32
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            power_level: PowerLevel::default(),
            data_rate: DataRate::default(),
            read_address: default_read_address(),
            write_address: default_write_address(),
            frame_size: default_frame_size(),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSettings {
    /// How long a transaction waits for the remote's reply frame.
    #[serde(default = "default_reply_timeout_ms")]
    pub reply_timeout_ms: u64,
    /// Sleep between availability polls. Zero spins.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_reply_timeout_ms() -> u64 {
    3000
}

fn default_poll_interval_ms() -> u64 {
    5
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            reply_timeout_ms: default_reply_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl TransactionSettings {
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// ---------------------------------------------------------------------------
// LinkDriver
// ---------------------------------------------------------------------------

/// Which `RadioLink` implementation to construct. The nRF24L01 SPI driver of
/// the reference deployment implements the same trait out-of-tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "driver", rename_all = "snake_case")]
pub enum LinkDriver {
    #[default]
    Loopback,
    Udp {
        bind: String,
        peer: String,
    },
}

impl LinkDriver {
    pub fn build(&self) -> Result<BoxedLink> {
        match self {
            LinkDriver::Loopback => Ok(Box::new(LoopbackLink::new())),
            LinkDriver::Udp { bind, peer } => Ok(Box::new(UdpLink::connect(bind, peer)?)),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub radio: RadioSettings,
    #[serde(default)]
    pub transaction: TransactionSettings,
    #[serde(default)]
    pub link: LinkDriver,
    #[serde(default)]
    pub server: ServerSettings,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BridgeError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load `path` when given, otherwise fall back to defaults (loopback
    /// link, reference radio parameters).
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.radio.frame_size == 0 || self.radio.frame_size > 32 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "radio.frame_size is {} (the link carries 1-32 byte frames)",
                    self.radio.frame_size
                ),
            });
        }

        for (name, addr) in [
            ("read_address", &self.radio.read_address),
            ("write_address", &self.radio.write_address),
        ] {
            if addr.is_empty() || addr.len() > 5 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "radio.{name} '{addr}' is not a 1-5 byte pipe address"
                    ),
                });
            }
        }

        if self.transaction.reply_timeout_ms == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "transaction.reply_timeout_ms is 0: every exchange would time out"
                    .to_string(),
            });
        } else if self.transaction.poll_interval_ms >= self.transaction.reply_timeout_ms {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "transaction.poll_interval_ms ({}) is not below reply_timeout_ms ({})",
                    self.transaction.poll_interval_ms, self.transaction.reply_timeout_ms
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
