//! Player Events
//!
//! Named after the media-element events they mirror, so the same vocabulary
//! works for the process backend and the browser element.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AudicError;

/// Events emitted by a player object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerEvent {
    /// Playback started after the backend acknowledged
    Playing,
    /// Playback paused
    Pause,
    /// Play was requested
    Play,
    /// Sampled position changed
    TimeUpdate,
    /// End-of-media reached
    Ended,
    /// Volume changed
    VolumeChange,
    /// Source enqueued and playable
    CanPlay,
    /// Source enqueued and playable to the end
    CanPlayThrough,
    /// Seek requested
    Seeking,
    /// Seek completed
    Seeked,
}

impl PlayerEvent {
    /// Every event, in declaration order
    pub const ALL: [PlayerEvent; 10] = [
        PlayerEvent::Playing,
        PlayerEvent::Pause,
        PlayerEvent::Play,
        PlayerEvent::TimeUpdate,
        PlayerEvent::Ended,
        PlayerEvent::VolumeChange,
        PlayerEvent::CanPlay,
        PlayerEvent::CanPlayThrough,
        PlayerEvent::Seeking,
        PlayerEvent::Seeked,
    ];

    /// DOM event name
    pub fn name(self) -> &'static str {
        match self {
            PlayerEvent::Playing => "playing",
            PlayerEvent::Pause => "pause",
            PlayerEvent::Play => "play",
            PlayerEvent::TimeUpdate => "timeupdate",
            PlayerEvent::Ended => "ended",
            PlayerEvent::VolumeChange => "volumechange",
            PlayerEvent::CanPlay => "canplay",
            PlayerEvent::CanPlayThrough => "canplaythrough",
            PlayerEvent::Seeking => "seeking",
            PlayerEvent::Seeked => "seeked",
        }
    }
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerEvent {
    type Err = AudicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| AudicError::invalid_argument(format!("Unknown event: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for event in PlayerEvent::ALL {
            assert_eq!(event.name().parse::<PlayerEvent>().unwrap(), event);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = "loadeddata".parse::<PlayerEvent>().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_serde_uses_dom_names() {
        let json = serde_json::to_string(&PlayerEvent::TimeUpdate).unwrap();
        assert_eq!(json, "\"timeupdate\"");
        let json = serde_json::to_string(&PlayerEvent::CanPlayThrough).unwrap();
        assert_eq!(json, "\"canplaythrough\"");
    }
}
