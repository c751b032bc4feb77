/// CLI configuration
use anyhow::{Context, Result};
use audic_core::types::DEFAULT_VOLUME;
use audic_core::validate;
use audic_desktop::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Looked up in the working directory when no `--config` is given
const DEFAULT_CONFIG_FILE: &str = "audic.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    /// Initial volume (`0.0..=1.0`), overridden by `--volume`
    #[serde(default = "default_volume")]
    pub volume: f64,

    #[serde(default)]
    pub player: PlayerConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            player: PlayerConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    /// Environment variables use the `AUDIC_` prefix with `__` between
    /// sections, e.g. `AUDIC_PLAYER__VLC__BINARY`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("AUDIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate::volume(self.volume)?;
        self.player.validate()?;
        Ok(())
    }
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}
