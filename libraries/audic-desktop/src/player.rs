//! Media-element style player object
//!
//! `Audic` owns one backing player, a readiness gate in front of it and a
//! polling task that keeps [`PlaybackState`] in sync with the backend.
//! Construction returns immediately; every command waits for startup on its
//! own, so callers never have to.

use audic_core::{
    validate, AudicError, BackingPlayer, NotifyMode, PlaybackState, PlaybackStateReconciler,
    PlayerCommand, PlayerEvent, PlayerPhase, Polling, Result, Sample,
};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::PlayerConfig;
use crate::gate::ReadinessGate;
use crate::poller::Poller;
use crate::vlc::VlcPlayer;

/// Capacity of the event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Playlist item toggled by play/pause
const PLAYLIST_ITEM: u32 = 0;

type Backend = Arc<dyn BackingPlayer>;

/// State shared between the player handle, its startup task and its poller
pub(crate) struct Shared {
    state: Mutex<PlaybackStateReconciler>,
    events: broadcast::Sender<PlayerEvent>,
    mode: NotifyMode,
}

impl Shared {
    fn new(src: Option<String>, mode: NotifyMode) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(PlaybackStateReconciler::new(src, mode)),
            events,
            mode,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlaybackStateReconciler> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one sample and emit the resulting events
    pub(crate) fn reconcile(&self, sample: Sample) -> Polling {
        let outcome = self.lock().on_sample(sample);
        for event in outcome.events {
            self.emit(event);
        }
        outcome.polling
    }

    fn emit(&self, event: PlayerEvent) {
        if self.mode == NotifyMode::PollOnly {
            return;
        }
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

/// Audio player mirroring the browser media-element API
///
/// # Example
///
/// ```no_run
/// use audic_desktop::Audic;
///
/// # async fn run() -> audic_core::Result<()> {
/// let player = Audic::new(Some("song.mp3"))?;
/// player.set_volume(0.5).await?;
/// player.play().await?;
/// # Ok(())
/// # }
/// ```
pub struct Audic {
    shared: Arc<Shared>,
    gate: Arc<ReadinessGate<Backend>>,
    poller: Arc<Poller>,
}

impl Audic {
    /// Create a player backed by a freshly launched VLC process
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(src: Option<&str>) -> Result<Self> {
        Self::with_config(src, PlayerConfig::default())
    }

    /// Create a player backed by VLC with explicit configuration
    pub fn with_config(src: Option<&str>, config: PlayerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AudicError::invalid_argument(e.to_string()))?;

        let vlc = config.vlc.clone();
        Self::with_backend(src, &config, async move {
            VlcPlayer::launch(&vlc).await.map_err(AudicError::from)
        })
    }

    /// Create a player whose backing player is produced by `startup`
    ///
    /// `startup` runs in the background; commands issued before it resolves
    /// wait for it. An empty `src` is the same as none.
    pub fn with_backend<F, B>(src: Option<&str>, config: &PlayerConfig, startup: F) -> Result<Self>
    where
        F: Future<Output = Result<B>> + Send + 'static,
        B: BackingPlayer + 'static,
    {
        let src = validate::source(src).map(str::to_string);
        let player = Self {
            shared: Arc::new(Shared::new(src.clone(), config.notify)),
            gate: Arc::new(ReadinessGate::new()),
            poller: Arc::new(Poller::new(config.poll_interval())),
        };

        tokio::spawn(start_backend(
            src,
            startup,
            player.shared.clone(),
            player.gate.clone(),
            player.poller.clone(),
        ));

        Ok(player)
    }

    // ===== Playback Control =====

    /// Start playing the audio
    ///
    /// No-op when already playing.
    pub async fn play(&self) -> Result<()> {
        self.ensure_alive()?;

        let was_ended = {
            let mut state = self.shared.lock();
            let was_ended = state.state().ended;
            if !state.request_play() {
                return Ok(());
            }
            was_ended
        };
        self.shared.emit(PlayerEvent::Play);

        let backend = match self.issue(PlayerCommand::PlaylistPause { id: PLAYLIST_ITEM }).await {
            Ok(backend) => backend,
            Err(e) => {
                self.shared.lock().revert_play();
                self.shared.emit(PlayerEvent::Pause);
                return Err(e);
            }
        };

        if was_ended {
            self.poller.restart(backend, self.shared.clone());
        } else {
            self.poller.start(backend, self.shared.clone());
        }

        self.shared.emit(PlayerEvent::Playing);
        Ok(())
    }

    /// Pause the audio playback
    ///
    /// No-op when already paused.
    pub async fn pause(&self) -> Result<()> {
        self.ensure_alive()?;

        if !self.shared.lock().request_pause() {
            return Ok(());
        }

        if let Err(e) = self.issue(PlayerCommand::PlaylistPause { id: PLAYLIST_ITEM }).await {
            self.shared.lock().revert_pause();
            return Err(e);
        }

        self.shared.emit(PlayerEvent::Pause);
        Ok(())
    }

    /// Play or pause to match `playing`
    pub async fn set_playing(&self, playing: bool) -> Result<()> {
        if playing {
            self.play().await
        } else {
            self.pause().await
        }
    }

    /// Set the volume (`0.0..=1.0`)
    ///
    /// The new level is readable immediately; the backend follows once ready.
    pub async fn set_volume(&self, volume: f64) -> Result<()> {
        self.ensure_alive()?;
        self.shared.lock().set_volume(volume)?;

        self.issue(PlayerCommand::volume(volume)).await?;
        self.shared.emit(PlayerEvent::VolumeChange);
        Ok(())
    }

    /// Replace the current source
    ///
    /// Playback stops; call [`Audic::play`] to start the new source. An empty
    /// `src` only empties the backend playlist.
    pub async fn set_src(&self, src: &str) -> Result<()> {
        self.ensure_alive()?;

        let backend = self.issue(PlayerCommand::PlaylistEmpty).await?;

        let Some(src) = validate::source(Some(src)) else {
            self.shared.lock().source_changed(None);
            debug!("Source cleared");
            self.poller.start(backend, self.shared.clone());
            return Ok(());
        };

        backend
            .command(PlayerCommand::Enqueue {
                input: src.to_string(),
            })
            .await?;

        self.shared.lock().source_changed(Some(src.to_string()));
        debug!("Source changed to {}", src);

        self.poller.start(backend, self.shared.clone());
        self.shared.emit(PlayerEvent::CanPlay);
        self.shared.emit(PlayerEvent::CanPlayThrough);
        Ok(())
    }

    /// Seek to a position in whole seconds
    ///
    /// `current_time` itself only changes once a sample confirms the seek.
    pub async fn set_current_time(&self, seconds: f64) -> Result<()> {
        let target = validate::current_time(seconds)?;
        self.ensure_alive()?;

        self.shared.emit(PlayerEvent::Seeking);
        self.issue(PlayerCommand::Seek { val: target }).await?;
        self.shared.emit(PlayerEvent::Seeked);
        Ok(())
    }

    /// Enable or disable looping
    pub async fn set_loop(&self, looping: bool) -> Result<()> {
        self.ensure_alive()?;

        if !self.shared.lock().set_looping(looping) {
            return Ok(());
        }

        if let Err(e) = self.issue(PlayerCommand::PlaylistRepeat).await {
            self.shared.lock().set_looping(!looping);
            return Err(e);
        }

        Ok(())
    }

    /// Destroy the player instance
    ///
    /// Stops polling and kills the backing player. Terminal: later commands
    /// fail with [`AudicError::Destroyed`]. Safe to call more than once.
    pub fn destroy(&self) {
        self.poller.shutdown();

        if let Some(backend) = self.gate.close() {
            info!("Destroying player");
            backend.kill();
        }
    }

    // ===== Events =====

    /// Subscribe to player events
    ///
    /// Only events emitted after subscribing are received. Nothing is emitted
    /// in [`NotifyMode::PollOnly`].
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.shared.events.subscribe()
    }

    // ===== State Queries =====

    /// Whether the audio is currently playing (application intent)
    pub fn playing(&self) -> bool {
        self.shared.lock().state().playing
    }

    /// Duration in seconds, `None` until the first sample
    pub fn duration(&self) -> Option<u64> {
        self.shared.lock().state().duration
    }

    pub fn volume(&self) -> f64 {
        self.shared.lock().state().volume
    }

    pub fn src(&self) -> Option<String> {
        self.shared.lock().state().src.clone()
    }

    /// Last sampled position in seconds
    pub fn current_time(&self) -> u64 {
        self.shared.lock().state().current_time
    }

    pub fn looping(&self) -> bool {
        self.shared.lock().state().looping
    }

    pub fn ended(&self) -> bool {
        self.shared.lock().state().ended
    }

    /// Snapshot of the full playback state
    pub fn state(&self) -> PlaybackState {
        self.shared.lock().state().clone()
    }

    /// Lifecycle phase
    pub fn phase(&self) -> PlayerPhase {
        if self.gate.is_closed() {
            return PlayerPhase::Destroyed;
        }
        if self.gate.is_failed() {
            return PlayerPhase::Failed;
        }
        if self.gate.is_starting() {
            return PlayerPhase::Uninitialized;
        }

        let reconciler = self.shared.lock();
        let state = reconciler.state();
        if state.ended {
            PlayerPhase::Ended
        } else if state.playing {
            PlayerPhase::Playing
        } else if reconciler.has_played() {
            PlayerPhase::Paused
        } else {
            PlayerPhase::Ready
        }
    }

    /// Whether the poll cycle is currently running
    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    // ===== Internals =====

    fn ensure_alive(&self) -> Result<()> {
        if self.gate.is_closed() {
            return Err(AudicError::Destroyed);
        }
        Ok(())
    }

    /// Wait for the backend, then send one command
    async fn issue(&self, command: PlayerCommand) -> Result<Backend> {
        let backend = self.gate.wait().await?;
        debug!("Sending {} {:?}", command.name(), command.args());
        backend.command(command).await?;
        Ok(backend)
    }
}

impl Drop for Audic {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Background startup: launch, enqueue the initial source, open the gate
async fn start_backend<F, B>(
    src: Option<String>,
    startup: F,
    shared: Arc<Shared>,
    gate: Arc<ReadinessGate<Backend>>,
    poller: Arc<Poller>,
) where
    F: Future<Output = Result<B>> + Send + 'static,
    B: BackingPlayer + 'static,
{
    let backend: Backend = match startup.await {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            warn!("Backing player failed to start: {}", e);
            gate.fail(e);
            return;
        }
    };

    if let Some(input) = src {
        if gate.is_closed() {
            debug!("Player destroyed during startup");
            backend.kill();
            return;
        }

        if let Err(e) = backend.command(PlayerCommand::Enqueue { input }).await {
            warn!("Failed to enqueue initial source: {}", e);
            gate.fail(e);
            backend.kill();
            return;
        }

        shared.emit(PlayerEvent::CanPlay);
        shared.emit(PlayerEvent::CanPlayThrough);
    }

    match gate.open(backend.clone()) {
        Ok(()) => {
            info!("Backing player ready");
            poller.start(backend, shared);
        }
        Err(backend) => {
            debug!("Player destroyed during startup");
            backend.kill();
        }
    }
}
