//! Audic - Playback State Core
//!
//! Platform-agnostic building blocks for a media-element style audio player.
//!
//! This crate provides:
//! - The playback data model (`PlaybackState`, `Sample`)
//! - Media-element events (`PlayerEvent`)
//! - The backing-player seam (`BackingPlayer`, `PlayerCommand`)
//! - The sample-driven state machine (`PlaybackStateReconciler`)
//! - Argument validation shared by every player variant
//!
//! # Architecture
//!
//! `audic-core` has no async runtime dependency:
//! - No dependency on tokio (native runtime lives in `audic-desktop`)
//! - No dependency on web-sys (browser variant lives in `audic-web`)
//!
//! # Example: Reconciling Samples
//!
//! ```rust
//! use audic_core::{NotifyMode, PlaybackStateReconciler, PlayerEvent, Polling, Sample};
//!
//! let mut reconciler = PlaybackStateReconciler::new(Some("song.mp3".into()), NotifyMode::Notify);
//! reconciler.request_play();
//!
//! let outcome = reconciler.on_sample(Sample::new(180, 12));
//! assert_eq!(outcome.events, vec![PlayerEvent::TimeUpdate]);
//!
//! let outcome = reconciler.on_sample(Sample::new(180, 180));
//! assert!(outcome.events.contains(&PlayerEvent::Ended));
//! assert_eq!(outcome.polling, Polling::Stop);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
mod error;
mod events;
mod reconciler;
pub mod types;
pub mod validate;

// Public exports
pub use backend::{backend_volume, BackingPlayer, PlayerCommand};
pub use error::{AudicError, Result};
pub use events::PlayerEvent;
pub use reconciler::{PlaybackStateReconciler, TickOutcome};
pub use types::{NotifyMode, PlaybackState, PlayerPhase, Polling, Sample};
