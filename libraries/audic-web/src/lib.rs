//! Audic - Browser Player
//!
//! WebAssembly bindings exposing the Audic surface on top of the platform's
//! `HTMLAudioElement`. The element does its own decoding, buffering and event
//! dispatch, so no polling is involved; validation and event names come from
//! `audic-core` and match the native player.
//!
//! ```js
//! import init, { WebAudic } from "audic-web";
//!
//! await init();
//! const player = new WebAudic("song.mp3");
//! player.on("ended", () => player.destroy());
//! player.volume = 0.5;
//! await player.play();
//! ```

pub mod listeners;
pub mod player;

pub use listeners::ListenerRegistry;
pub use player::{event_names, WebAudic};
