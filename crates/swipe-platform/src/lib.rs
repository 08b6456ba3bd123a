//! Collaborator seams so `swipe-core` stays free of windowing and audio backends.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Pointer input in logical drawing-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    /// The pointer left the surface mid-gesture.
    Leave,
}

/// One of the two swipe sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Chirp,
    Chime,
}

impl Cue {
    pub const ALL: [Cue; 2] = [Cue::Chirp, Cue::Chime];

    pub fn index(self) -> usize {
        match self {
            Cue::Chirp => 0,
            Cue::Chime => 1,
        }
    }
}

/// Fire-and-forget sound output. Implementations must not block the caller.
pub trait CuePlayer: Send {
    fn play(&mut self, cue: Cue) -> Result<()>;
}

/// Player used when audio is disabled or unavailable.
#[derive(Debug, Default)]
pub struct MutedCues;

impl CuePlayer for MutedCues {
    fn play(&mut self, cue: Cue) -> Result<()> {
        tracing::trace!("muted cue {cue:?}");
        Ok(())
    }
}
