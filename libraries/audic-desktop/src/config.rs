/// Player configuration
use audic_core::NotifyMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DesktopError, Result};

/// Default sampling period in milliseconds
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Sampling period of the backing player
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub notify: NotifyMode,

    #[serde(default = "default_vlc")]
    pub vlc: VlcConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VlcConfig {
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP interface port; a free port is picked when absent
    #[serde(default)]
    pub port: Option<u16>,

    /// HTTP interface password; a random one is generated when absent
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_startup_probe_attempts")]
    pub startup_probe_attempts: u32,

    #[serde(default = "default_startup_probe_interval_ms")]
    pub startup_probe_interval_ms: u64,

    /// Appended to the generated command line
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl PlayerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(DesktopError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        self.vlc.validate()
    }
}

impl VlcConfig {
    pub fn startup_probe_interval(&self) -> Duration {
        Duration::from_millis(self.startup_probe_interval_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.binary.as_os_str().is_empty() {
            return Err(DesktopError::Config("VLC binary path is empty".to_string()));
        }

        if self.host.is_empty() {
            return Err(DesktopError::Config("VLC host is empty".to_string()));
        }

        if self.startup_probe_attempts == 0 {
            return Err(DesktopError::Config(
                "startup_probe_attempts must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_vlc() -> VlcConfig {
    VlcConfig {
        binary: default_binary(),
        host: default_host(),
        port: None,
        password: None,
        startup_probe_attempts: default_startup_probe_attempts(),
        startup_probe_interval_ms: default_startup_probe_interval_ms(),
        extra_args: Vec::new(),
    }
}

fn default_binary() -> PathBuf {
    PathBuf::from("vlc")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_startup_probe_attempts() -> u32 {
    50
}

fn default_startup_probe_interval_ms() -> u64 {
    100
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            notify: NotifyMode::default(),
            vlc: default_vlc(),
        }
    }
}

impl Default for VlcConfig {
    fn default() -> Self {
        default_vlc()
    }
}
