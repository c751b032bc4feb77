/// Audic - play audio files from the command line
use anyhow::Context;
use audic_cli::{logging, progress, CliConfig};
use audic_core::PlayerEvent;
use audic_desktop::Audic;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "audic")]
#[command(about = "Play audio files through a VLC backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a file until it ends (or until Ctrl-C when looping)
    Play {
        /// File path or URL
        src: String,
        /// Volume (0.0 - 1.0)
        #[arg(short, long)]
        volume: Option<f64>,
        /// Repeat until interrupted
        #[arg(short, long = "loop")]
        looping: bool,
        /// Start position in seconds
        #[arg(short, long)]
        start: Option<u64>,
        /// Configuration file path
        #[arg(short, long, env = "AUDIC_CONFIG")]
        config: Option<PathBuf>,
    },
    /// List the events a player emits
    Events,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(logging::env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            src,
            volume,
            looping,
            start,
            config,
        } => {
            let config = CliConfig::load(config.as_deref())?;
            config.validate()?;
            play(&src, volume.unwrap_or(config.volume), looping, start, config).await?;
        }
        Commands::Events => {
            for event in PlayerEvent::ALL {
                println!("{}", event);
            }
        }
    }

    Ok(())
}

async fn play(
    src: &str,
    volume: f64,
    looping: bool,
    start: Option<u64>,
    config: CliConfig,
) -> anyhow::Result<()> {
    let player = Audic::with_config(Some(src), config.player)?;
    let mut events = player.subscribe();

    player.set_volume(volume).await?;
    if looping {
        player.set_loop(true).await?;
    }
    player.play().await.context("Failed to start playback")?;
    if let Some(start) = start {
        player.set_current_time(start as f64).await?;
    }

    tracing::info!("Playing {}", src);

    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(PlayerEvent::TimeUpdate) => {
                    println!("{}", progress::progress_line(&player.state()));
                }
                Ok(PlayerEvent::Ended) if !player.looping() => {
                    tracing::info!("Finished {}", src);
                    break;
                }
                Ok(event) => tracing::debug!("Event: {}", event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {} player events", skipped);
                    if player.ended() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
            _ = &mut interrupted => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    player.destroy();
    Ok(())
}
