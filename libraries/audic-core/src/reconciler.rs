//! Playback state reconciliation
//!
//! Turns periodic `(length, time)` samples from a backing player into a
//! coherent playback state and a deduplicated stream of events.
//!
//! End-of-media is edge-triggered: the reconciler stores the previous tick's
//! classification and only reacts when it changes, so a backend that keeps
//! reporting `length == time` produces a single `ended` event.

use crate::error::Result;
use crate::events::PlayerEvent;
use crate::types::{NotifyMode, PlaybackState, Polling, Sample};
use crate::validate;

/// Result of reconciling one sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Events to emit, in order
    pub events: Vec<PlayerEvent>,
    /// Whether polling should continue
    pub polling: Polling,
}

impl TickOutcome {
    fn quiet() -> Self {
        Self {
            events: Vec::new(),
            polling: Polling::Continue,
        }
    }
}

/// Playback state machine driven by samples and commands
#[derive(Debug, Clone)]
pub struct PlaybackStateReconciler {
    state: PlaybackState,
    mode: NotifyMode,

    /// Previous tick was classified as end-of-media
    at_end: bool,

    /// End-of-media seen while looping; waiting for the backend to restart
    restart_pending: bool,

    /// Play has been requested at least once
    activated: bool,
}

impl PlaybackStateReconciler {
    /// Create a reconciler for a player with an optional source
    ///
    /// Without a source there is nothing to finish, so end-of-media tracking
    /// starts as if the end had already been reported.
    pub fn new(src: Option<String>, mode: NotifyMode) -> Self {
        Self {
            at_end: src.is_none(),
            state: PlaybackState::new(src),
            mode,
            restart_pending: false,
            activated: false,
        }
    }

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Notification mode
    pub fn mode(&self) -> NotifyMode {
        self.mode
    }

    /// Whether play has ever been requested
    pub fn has_played(&self) -> bool {
        self.activated
    }

    // ===== Sampling =====

    /// Reconcile one sample from the backing player
    pub fn on_sample(&mut self, sample: Sample) -> TickOutcome {
        let mut outcome = TickOutcome::quiet();

        if sample.time != self.state.current_time {
            self.state.current_time = sample.time;
            outcome.events.push(PlayerEvent::TimeUpdate);
        }

        self.state.duration = Some(sample.length);

        if sample.is_stopped() {
            self.state.playing = false;
        }

        if self.mode == NotifyMode::PollOnly {
            return TickOutcome::quiet();
        }

        let at_end = sample.is_end_of_media();

        if at_end && !self.at_end {
            self.state.playing = false;
            outcome.events.push(PlayerEvent::Ended);

            if self.state.looping {
                // Backend repeats on its own; keep sampling.
                self.state.ended = false;
                self.restart_pending = true;
            } else {
                self.state.ended = true;
                outcome.polling = Polling::Stop;
            }
        } else if !at_end && self.restart_pending {
            self.restart_pending = false;

            if self.state.looping && !sample.is_stopped() {
                self.state.playing = true;
                outcome.events.push(PlayerEvent::Playing);
            }
        }

        self.at_end = at_end;
        outcome
    }

    // ===== Commands =====

    /// Record the intent to play
    ///
    /// Returns `false` when already playing, in which case no command should
    /// be sent.
    pub fn request_play(&mut self) -> bool {
        if self.state.playing {
            return false;
        }

        if self.state.ended {
            // Replay from the end; the next end-of-media is a new edge
            self.at_end = false;
        }

        self.state.playing = true;
        self.state.ended = false;
        self.restart_pending = false;
        self.activated = true;
        true
    }

    /// Record the intent to pause
    ///
    /// Returns `false` when already paused.
    pub fn request_pause(&mut self) -> bool {
        if !self.state.playing {
            return false;
        }

        self.state.playing = false;
        true
    }

    /// Undo a play intent whose command failed
    pub fn revert_play(&mut self) {
        self.state.playing = false;
    }

    /// Undo a pause intent whose command failed
    pub fn revert_pause(&mut self) {
        self.state.playing = true;
    }

    /// Validate and record a new volume
    ///
    /// On error the previous volume is kept.
    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        validate::volume(volume)?;
        self.state.volume = volume;
        Ok(())
    }

    /// Record the loop flag
    ///
    /// Returns `true` when the flag changed (the backend toggle must be sent).
    pub fn set_looping(&mut self, looping: bool) -> bool {
        if self.state.looping == looping {
            return false;
        }

        self.state.looping = looping;
        if !looping {
            self.restart_pending = false;
        }
        true
    }

    /// Record a replaced backend queue (`None` when it was only emptied)
    ///
    /// Playback is stopped and end-of-media tracking starts over.
    pub fn source_changed(&mut self, src: Option<String>) {
        self.at_end = src.is_none();
        self.state.src = src;
        self.state.playing = false;
        self.state.ended = false;
        self.restart_pending = false;
    }
}
