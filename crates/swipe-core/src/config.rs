use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::palette::Palette;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sensory Swipe".into(),
            width: 1024.0,
            height: 768.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub spacing: f32,
    pub jitter: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            spacing: 5.0,
            jitter: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub retention_ms: u64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self { retention_ms: 5000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Opacity of the black overlay painted each frame instead of clearing.
    pub fade_alpha: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { fade_alpha: 0.02 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub volume: f32,
    /// Sound files replacing the built-in cues, in cue order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cue_files: Option<[PathBuf; 2]>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.3,
            cue_files: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Fixed seed for all random draws; a fresh one is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub window: WindowConfig,
    pub emitter: EmitterConfig,
    pub trails: TrailConfig,
    pub render: RenderConfig,
    pub audio: AudioConfig,
    pub palette: Palette,
}

impl SwipeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("json") => Self::from_json_str(&source),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.palette.particle_colors.is_empty() {
            return invalid("palette.particle_colors must not be empty");
        }
        if self.palette.backgrounds.is_empty() {
            return invalid("palette.backgrounds must not be empty");
        }
        if !(self.emitter.spacing > 0.0) {
            return invalid("emitter.spacing must be positive");
        }
        if !(self.emitter.jitter >= 0.0) {
            return invalid("emitter.jitter must not be negative");
        }
        if !(0.0..=1.0).contains(&self.render.fade_alpha) {
            return invalid("render.fade_alpha must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return invalid("audio.volume must be within [0, 1]");
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return invalid("window size must be positive");
        }
        Ok(())
    }

    pub fn retention(&self) -> Duration {
        Duration::from_millis(self.trails.retention_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn defaults_are_valid() {
        let config = SwipeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.retention(), Duration::from_secs(5));
        assert_eq!(config.audio.volume, 0.3);
        assert_eq!(config.palette.backgrounds.len(), 8);
    }

    #[test]
    fn toml_round_trip_preserves_palette() {
        let mut config = SwipeConfig::default();
        config.seed = Some(99);
        config.palette.particle_colors = vec![Rgba::from_rgb_u32(0x123456)];
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("#123456"));
        assert_eq!(SwipeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = SwipeConfig::from_toml_str(
            r#"
            seed = 7

            [emitter]
            spacing = 8.0

            [audio]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.emitter.spacing, 8.0);
        assert_eq!(config.emitter.jitter, 5.0);
        assert!(!config.audio.enabled);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn json_is_accepted() {
        let config =
            SwipeConfig::from_json_str(r#"{ "render": { "fade_alpha": 0.1 } }"#).unwrap();
        assert_eq!(config.render.fade_alpha, 0.1);
    }

    #[test]
    fn rejects_bad_values() {
        let empty = SwipeConfig::from_toml_str("[palette]\nparticle_colors = []\n");
        assert!(matches!(empty, Err(ConfigError::Invalid(_))));

        let bad_hex = SwipeConfig::from_toml_str("[palette]\nparticle_colors = [\"#12\"]\n");
        assert!(matches!(bad_hex, Err(ConfigError::Toml(_))));

        let loud = SwipeConfig::from_toml_str("[audio]\nvolume = 2.0\n");
        assert!(matches!(loud, Err(ConfigError::Invalid(_))));

        let still = SwipeConfig::from_toml_str("[emitter]\nspacing = 0.0\n");
        assert!(matches!(still, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = std::env::temp_dir().join("swipe-core-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.yaml");
        fs::write(&path, "seed: 1\n").unwrap();
        assert!(matches!(
            SwipeConfig::load(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SwipeConfig::load(&dir.join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
