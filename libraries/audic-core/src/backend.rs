//! Backing player seam
//!
//! A backing player is whatever actually produces audio: an external player
//! process, or a test fake. Commands use the playlist vocabulary of the VLC
//! HTTP interface.

use crate::error::Result;
use crate::types::Sample;
use async_trait::async_trait;

/// Scale of the backend volume parameter (`0..=VOLUME_SCALE`)
pub const VOLUME_SCALE: f64 = 256.0;

/// Commands understood by a backing player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Toggle pause/resume for a playlist item
    PlaylistPause {
        /// Playlist item id
        id: u32,
    },
    /// Clear the playlist
    PlaylistEmpty,
    /// Enqueue a media locator without starting it
    Enqueue {
        /// Media locator
        input: String,
    },
    /// Set output level on the backend scale
    Volume {
        /// Level, `0..=256`
        val: u32,
    },
    /// Jump to an absolute position (seconds)
    Seek {
        /// Target position
        val: u64,
    },
    /// Toggle repeat mode
    PlaylistRepeat,
}

impl PlayerCommand {
    /// Build a volume command from a `[0, 1]` level
    pub fn volume(level: f64) -> Self {
        Self::Volume {
            val: backend_volume(level),
        }
    }

    /// Wire name of the command
    pub fn name(&self) -> &'static str {
        match self {
            PlayerCommand::PlaylistPause { .. } => "pl_pause",
            PlayerCommand::PlaylistEmpty => "pl_empty",
            PlayerCommand::Enqueue { .. } => "in_enqueue",
            PlayerCommand::Volume { .. } => "volume",
            PlayerCommand::Seek { .. } => "seek",
            PlayerCommand::PlaylistRepeat => "pl_repeat",
        }
    }

    /// Command arguments as `(key, value)` pairs
    pub fn args(&self) -> Vec<(&'static str, String)> {
        match self {
            PlayerCommand::PlaylistPause { id } => vec![("id", id.to_string())],
            PlayerCommand::Enqueue { input } => vec![("input", input.clone())],
            PlayerCommand::Volume { val } => vec![("val", val.to_string())],
            PlayerCommand::Seek { val } => vec![("val", val.to_string())],
            PlayerCommand::PlaylistEmpty | PlayerCommand::PlaylistRepeat => Vec::new(),
        }
    }
}

/// Convert a `[0, 1]` volume to the backend's integer scale
pub fn backend_volume(level: f64) -> u32 {
    (level.clamp(0.0, 1.0) * VOLUME_SCALE).round() as u32
}

/// Asynchronous capability that produces audio output
///
/// Implementations own their resources exclusively; a player object never
/// shares its backing player.
#[async_trait]
pub trait BackingPlayer: Send + Sync {
    /// Issue a command
    async fn command(&self, command: PlayerCommand) -> Result<()>;

    /// Fetch the current `(length, time)` sample
    async fn info(&self) -> Result<Sample>;

    /// Terminate the backing player and release its resources
    ///
    /// Fire-and-forget; must not block.
    fn kill(&self);
}
