//! Core types for playback state

use serde::{Deserialize, Serialize};

/// Default volume for a new player (unity)
pub const DEFAULT_VOLUME: f64 = 1.0;

/// One `(duration, currentTime)` reading from the backing player, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Media duration
    pub length: u64,
    /// Current playback position
    pub time: u64,
}

impl Sample {
    /// Create a new sample
    pub fn new(length: u64, time: u64) -> Self {
        Self { length, time }
    }

    /// Create a sample from raw signed values, clamping negatives to zero
    ///
    /// Some backends report `-1` when the length is unknown.
    pub fn from_signed(length: i64, time: i64) -> Self {
        Self {
            length: length.max(0) as u64,
            time: time.max(0) as u64,
        }
    }

    /// No media loaded, or playback halted
    pub fn is_stopped(&self) -> bool {
        self.length == 0 && self.time == 0
    }

    /// Playback position has reached a real (non-zero) duration
    pub fn is_end_of_media(&self) -> bool {
        self.length > 0 && self.length == self.time
    }
}

/// Canonical playback state of one player object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Currently enqueued media locator
    pub src: Option<String>,
    /// Output level in `[0, 1]`
    pub volume: f64,
    /// Last sampled position (seconds)
    pub current_time: u64,
    /// Last sampled duration (seconds), `None` until the first sample
    pub duration: Option<u64>,
    /// Application intent, not the backend's raw report
    pub playing: bool,
    /// Restart instead of stopping at end-of-media
    pub looping: bool,
    /// Playback ran to completion and polling stopped
    pub ended: bool,
}

impl PlaybackState {
    /// Create the initial state for a player
    pub fn new(src: Option<String>) -> Self {
        Self {
            src,
            volume: DEFAULT_VOLUME,
            current_time: 0,
            duration: None,
            playing: false,
            looping: false,
            ended: false,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Whether the reconciler classifies end-of-media and emits events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyMode {
    /// Emit events, stop polling at end-of-media unless looping
    #[default]
    Notify,
    /// Only refresh state; callers poll `playing`/`duration`/`current_time`
    PollOnly,
}

/// Whether the polling cycle should keep running after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polling {
    /// Schedule the next tick
    Continue,
    /// End-of-media reached without looping
    Stop,
}

/// Coarse lifecycle phase of a player object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerPhase {
    /// Backing player still starting
    Uninitialized,
    /// Backing player ready, nothing requested yet
    Ready,
    /// Playing audio
    Playing,
    /// Paused, or stopped by the backend
    Paused,
    /// Ran to completion
    Ended,
    /// Backing player failed to start
    Failed,
    /// Torn down
    Destroyed,
}
