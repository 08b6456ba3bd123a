//! Desktop wiring for Sensory Swipe: audio backend selection and the app entry.
use swipe_core::{AudioConfig, SeededRandom, SwipeConfig, SwipeGame};
use swipe_platform::{CuePlayer, MutedCues, Result};
use tracing::{info, warn};

cfg_if::cfg_if! {
    if #[cfg(feature = "audio")] {
        mod audio;
        pub use crate::audio::RodioCuePlayer;
    }
}

// Public app entry ----------------
/// Build the game from `config` and run the window until it is closed.
pub fn run_app(config: &SwipeConfig) -> Result<()> {
    config.validate()?;
    let rng = match config.seed {
        Some(seed) => {
            info!("using fixed seed {seed}");
            SeededRandom::new(seed)
        }
        None => SeededRandom::from_entropy(),
    };
    let game = SwipeGame::new(config, rng, cue_player(config));
    swipe_ui::run(game, &config.window)?;
    info!("window closed");
    Ok(())
}

/// Audio failures never stop the app; a muted player stands in.
pub fn cue_player(config: &SwipeConfig) -> Box<dyn CuePlayer> {
    if !config.audio.enabled {
        info!("audio disabled in config");
        return Box::new(MutedCues);
    }
    audio_backend(&config.audio)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "audio")] {
        fn audio_backend(config: &AudioConfig) -> Box<dyn CuePlayer> {
            match RodioCuePlayer::spawn(config) {
                Ok(player) => Box::new(player),
                Err(err) => {
                    warn!("failed to start audio thread: {err}");
                    Box::new(MutedCues)
                }
            }
        }
    } else {
        fn audio_backend(_config: &AudioConfig) -> Box<dyn CuePlayer> {
            warn!("built without the `audio` feature; cues are muted");
            Box::new(MutedCues)
        }
    }
}
