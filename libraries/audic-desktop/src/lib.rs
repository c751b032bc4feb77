//! Audic - Native Player
//!
//! A media-element style audio player for non-browser environments. Decoding
//! and output are delegated to an external VLC process; this crate only keeps
//! its state in sync.
//!
//! # Features
//!
//! - Construction never blocks; commands wait for backend startup on their own
//! - Single-flight polling (1 s by default) with deduplicated events
//! - Loop handling across polling ticks
//! - `play_file` convenience that resolves when playback ends
//!
//! # Example
//!
//! ```no_run
//! use audic_desktop::Audic;
//! use audic_core::PlayerEvent;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let player = Audic::new(Some("song.mp3"))?;
//!     let mut events = player.subscribe();
//!
//!     player.play().await?;
//!
//!     while let Ok(event) = events.recv().await {
//!         if event == PlayerEvent::Ended {
//!             break;
//!         }
//!     }
//!
//!     player.destroy();
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod gate;
mod play;
mod player;
mod poller;
pub mod vlc;

pub use config::{PlayerConfig, VlcConfig};
pub use error::{DesktopError, Result};
pub use gate::ReadinessGate;
pub use play::{play_file, play_file_on, play_file_with};
pub use player::Audic;
pub use vlc::{VlcPlayer, VlcStatus};
