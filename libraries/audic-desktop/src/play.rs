//! Play a file to completion

use audic_core::{validate, AudicError, BackingPlayer, NotifyMode, PlayerEvent, Result};
use std::future::Future;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::config::PlayerConfig;
use crate::player::Audic;

/// Play `src` with default settings and resolve when playback ends
///
/// # Example
///
/// ```no_run
/// # async fn run() -> audic_core::Result<()> {
/// audic_desktop::play_file("alarm.mp3").await?;
/// # Ok(())
/// # }
/// ```
pub async fn play_file(src: &str) -> Result<()> {
    play_file_with(src, PlayerConfig::default()).await
}

/// Play `src` with explicit configuration and resolve when playback ends
///
/// Notifications are always enabled, since completion is detected through
/// the `ended` event. An empty `src` has nothing to play and resolves at once.
pub async fn play_file_with(src: &str, config: PlayerConfig) -> Result<()> {
    if validate::source(Some(src)).is_none() {
        return Ok(());
    }

    let config = PlayerConfig {
        notify: NotifyMode::Notify,
        ..config
    };
    let player = Audic::with_config(Some(src), config)?;
    play_to_end(&player).await
}

/// Same as [`play_file_with`], with a custom backing player
pub async fn play_file_on<F, B>(src: &str, config: PlayerConfig, startup: F) -> Result<()>
where
    F: Future<Output = Result<B>> + Send + 'static,
    B: BackingPlayer + 'static,
{
    if validate::source(Some(src)).is_none() {
        return Ok(());
    }

    let config = PlayerConfig {
        notify: NotifyMode::Notify,
        ..config
    };
    let player = Audic::with_backend(Some(src), &config, startup)?;
    play_to_end(&player).await
}

async fn play_to_end(player: &Audic) -> Result<()> {
    let result = play_and_wait(player).await;
    player.destroy();
    result
}

async fn play_and_wait(player: &Audic) -> Result<()> {
    let mut events = player.subscribe();

    player.play().await?;
    debug!("Waiting for end of media");

    loop {
        match events.recv().await {
            Ok(PlayerEvent::Ended) => return Ok(()),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!("Missed {} player events", skipped);
                if player.ended() {
                    return Ok(());
                }
            }
            Err(RecvError::Closed) => return Err(AudicError::Destroyed),
        }
    }
}
