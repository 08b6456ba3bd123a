//! Sensory Swipe core engine: platform-agnostic particles, trails, rendering and
//! gesture handling.

pub mod canvas;
pub mod color;
pub mod config;
pub mod emitter;
pub mod error;
pub mod game;
pub mod palette;
pub mod particle;
pub mod raster;
pub mod render;
pub mod rng;
pub mod simulation;
pub mod trail;

pub use canvas::{Canvas, ColorStop, RadialGradient, Shape};
pub use color::Rgba;
pub use config::{AudioConfig, EmitterConfig, RenderConfig, SwipeConfig, TrailConfig, WindowConfig};
pub use emitter::Emitter;
pub use error::{ColorParseError, ConfigError};
pub use game::{GameState, SwipeGame};
pub use palette::{BackgroundCycle, BackgroundGradient, Palette};
pub use particle::{Particle, ParticleStyle};
pub use raster::RasterCanvas;
pub use render::Renderer;
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use simulation::Simulation;
pub use trail::Trail;

/// Environment variable naming a config file to load at startup.
pub const CONFIG_ENV: &str = "SENSORY_SWIPE_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "sensory-swipe.toml";
