//! VLC backing player
//!
//! Drives a VLC process through its HTTP interface. Every command is a
//! `GET /requests/status.json?command=...` with HTTP basic auth (empty user,
//! generated password); the same endpoint without a command reports the
//! current `length` and `time`.

use async_trait::async_trait;
use audic_core::{BackingPlayer, PlayerCommand, Sample};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use std::process::Stdio;
use std::sync::{Mutex, PoisonError};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::VlcConfig;
use crate::error::{DesktopError, Result};

const STATUS_PATH: &str = "/requests/status.json";

/// Length of generated HTTP interface passwords
const PASSWORD_LENGTH: usize = 24;

/// Subset of VLC's `status.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VlcStatus {
    /// Media length in seconds (`-1` or `0` when unknown)
    #[serde(default)]
    pub length: i64,
    /// Position in seconds
    #[serde(default)]
    pub time: i64,
    /// `playing`, `paused` or `stopped`
    #[serde(default)]
    pub state: String,
}

impl VlcStatus {
    pub fn sample(&self) -> Sample {
        Sample::from_signed(self.length, self.time)
    }
}

/// VLC instance controlled over HTTP
pub struct VlcPlayer {
    http: Client,
    base_url: String,
    password: String,
    /// Owned process, `None` when attached to an external instance
    child: Mutex<Option<Child>>,
}

impl VlcPlayer {
    /// Attach to an already running VLC HTTP interface
    ///
    /// `kill` does not terminate an attached instance.
    pub fn connect(base_url: &str, password: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DesktopError::Config(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .user_agent(format!("Audic/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            password: password.to_string(),
            child: Mutex::new(None),
        })
    }

    /// Spawn VLC and wait until its HTTP interface answers
    pub async fn launch(config: &VlcConfig) -> Result<Self> {
        config.validate()?;

        let port = match config.port {
            Some(port) => port,
            None => free_port(&config.host)?,
        };
        let password = config.password.clone().unwrap_or_else(generate_password);

        let mut cmd = Command::new(&config.binary);
        cmd.arg("--intf")
            .arg("dummy")
            .arg("--extraintf")
            .arg("http")
            .arg("--http-host")
            .arg(&config.host)
            .arg("--http-port")
            .arg(port.to_string())
            .arg("--http-password")
            .arg(&password)
            .args(&config.extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        debug!(binary = ?config.binary, port, "Launching VLC");
        let child = cmd
            .spawn()
            .map_err(|e| DesktopError::Launch(format!("{}: {}", config.binary.display(), e)))?;

        let player = Self::connect(&format!("http://{}:{}", config.host, port), &password)?;
        *player.lock_child() = Some(child);

        player.wait_until_reachable(config).await?;
        info!(port, "VLC HTTP interface ready");

        Ok(player)
    }

    /// Base URL of the HTTP interface
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full status, optionally issuing a command
    pub async fn status(&self, query: &[(&str, String)]) -> Result<VlcStatus> {
        let url = format!("{}{}", self.base_url, STATUS_PATH);

        let response = self
            .http
            .get(&url)
            .basic_auth("", Some(&self.password))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DesktopError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<VlcStatus>().await?)
    }

    async fn wait_until_reachable(&self, config: &VlcConfig) -> Result<()> {
        for attempt in 1..=config.startup_probe_attempts {
            if let Some(exit) = self.try_wait()? {
                return Err(DesktopError::ExitedDuringStartup(exit));
            }

            match self.status(&[]).await {
                Ok(_) => return Ok(()),
                Err(e) => debug!(attempt, "VLC not reachable yet: {}", e),
            }

            tokio::time::sleep(config.startup_probe_interval()).await;
        }

        self.kill_child();
        Err(DesktopError::StartupTimedOut {
            attempts: config.startup_probe_attempts,
        })
    }

    fn try_wait(&self) -> Result<Option<String>> {
        let mut child = self.lock_child();
        match child.as_mut() {
            Some(child) => Ok(child.try_wait()?.map(|status| status.to_string())),
            None => Ok(None),
        }
    }

    fn kill_child(&self) {
        if let Some(mut child) = self.lock_child().take() {
            if let Err(e) = child.start_kill() {
                warn!("Failed to kill VLC: {}", e);
            }
        }
    }

    fn lock_child(&self) -> std::sync::MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BackingPlayer for VlcPlayer {
    async fn command(&self, command: PlayerCommand) -> audic_core::Result<()> {
        let mut query = vec![("command", command.name().to_string())];
        query.extend(command.args());

        self.status(&query).await?;
        Ok(())
    }

    async fn info(&self) -> audic_core::Result<Sample> {
        Ok(self.status(&[]).await?.sample())
    }

    fn kill(&self) {
        self.kill_child();
    }
}

/// Ask the OS for a free TCP port on `host`
fn free_port(host: &str) -> Result<u16> {
    let listener = std::net::TcpListener::bind((host, 0))?;
    Ok(listener.local_addr()?.port())
}

fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_clamps_unknown_length() {
        let status: VlcStatus =
            serde_json::from_str(r#"{"length": -1, "time": 0, "state": "stopped", "volume": 256}"#)
                .unwrap();
        assert_eq!(status.sample(), Sample::new(0, 0));
        assert_eq!(status.state, "stopped");
    }

    #[test]
    fn test_status_parsing_missing_fields() {
        let status: VlcStatus = serde_json::from_str(r#"{"apiversion": 3}"#).unwrap();
        assert_eq!(status, VlcStatus::default());
    }

    #[test]
    fn test_connect_normalizes_url() {
        let player = VlcPlayer::connect("http://127.0.0.1:8080/", "pw").unwrap();
        assert_eq!(player.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_connect_rejects_bad_scheme() {
        assert!(matches!(
            VlcPlayer::connect("127.0.0.1:8080", "pw"),
            Err(DesktopError::Config(_))
        ));
    }

    #[test]
    fn test_generated_password() {
        let a = generate_password();
        let b = generate_password();
        assert_eq!(a.len(), PASSWORD_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_free_port_is_bindable() {
        let port = free_port("127.0.0.1").unwrap();
        assert!(port > 0);
    }

    #[tokio::test]
    async fn test_launch_missing_binary_fails() {
        let config = VlcConfig {
            binary: "/nonexistent/audic-vlc".into(),
            ..VlcConfig::default()
        };
        assert!(matches!(
            VlcPlayer::launch(&config).await,
            Err(DesktopError::Launch(_))
        ));
    }
}
