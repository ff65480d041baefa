//! Game configuration
//!
//! A single static structure read once at startup from `assets/config.ron`.
//! Every field has a default, so a partial file (or no file at all) works.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::asset::{default_manifest, ResourceSpec};
use crate::error::{GameError, Result};

/// Default location of the config file, relative to the working directory
pub const CONFIG_PATH: &str = "assets/config.ron";

/// Which graphics backend to request from the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RendererMode {
    /// Let the platform pick
    #[default]
    Auto,
    OpenGl,
    /// Only honoured on Apple platforms
    Metal,
}

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    /// As fast as possible
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }
}

/// How enemies choose their next patrol velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatrolRule {
    /// 0 -> +100 -> -100, then stuck at -100 for good.
    /// Kept as the default for behavioural parity with the prototype.
    #[default]
    Parity,
    /// 0 -> +100 -> -100 -> +100 -> ...
    Cycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Canvas width in pixels (also the world width)
    pub width: u32,
    /// Canvas height in pixels (also the world height)
    pub height: u32,
    pub renderer: RendererMode,
    /// Downward acceleration in px/s²
    pub gravity: f32,
    /// Draw body outlines on top of sprites
    pub debug: bool,
    pub fps_limit: FpsLimit,
    /// Upper bound on the delta passed to a tick, in seconds
    pub max_frame_delta: f32,
    pub patrol: PatrolRule,
    /// Collision size of each platform (width, height)
    pub platform_size: (f32, f32),
    /// Directory that resource paths are relative to
    pub asset_root: String,
    /// Resources registered during the load phase
    pub resources: Vec<ResourceSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            renderer: RendererMode::Auto,
            gravity: 300.0,
            debug: false,
            fps_limit: FpsLimit::default(),
            max_frame_delta: 0.05,
            patrol: PatrolRule::default(),
            platform_size: (400.0, 32.0),
            asset_root: "assets".to_string(),
            resources: default_manifest(),
        }
    }
}

impl GameConfig {
    /// Load config from a RON file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let config = Self::from_ron(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config through macroquad's file API (WASM has no filesystem).
    /// An unreachable file yields the defaults.
    #[cfg(target_arch = "wasm32")]
    pub async fn load_bundled(path: &str) -> Result<Self> {
        match macroquad::file::load_string(path).await {
            Ok(text) => Self::from_ron(&text),
            Err(e) => {
                log::info!("No config at {} ({}), using defaults", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate config from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: GameConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the world unusable
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.gravity.is_finite() {
            return Err(GameError::InvalidConfig(format!("gravity {} is not finite", self.gravity)));
        }
        if !(self.max_frame_delta > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "max_frame_delta must be positive, got {}",
                self.max_frame_delta
            )));
        }
        let (pw, ph) = self.platform_size;
        if !(pw > 0.0 && ph > 0.0) {
            return Err(GameError::InvalidConfig(format!("platform_size must be positive, got {}x{}", pw, ph)));
        }
        Ok(())
    }

    /// Clamp a raw frame delta to the configured maximum
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        delta.clamp(0.0, self.max_frame_delta)
    }

    /// Resolve a resource path against the asset root
    pub fn asset_path(&self, relative: &str) -> String {
        if self.asset_root.is_empty() {
            relative.to_string()
        } else {
            format!("{}/{}", self.asset_root.trim_end_matches('/'), relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(dir.path().join("nope.ron")).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.gravity, 300.0);
        assert!(!config.debug);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(debug: true, patrol: Cycle)").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.patrol, PatrolRule::Cycle);
        assert_eq!(config.width, 800);
        assert_eq!(config.resources.len(), default_manifest().len());
    }

    #[test]
    fn test_bad_ron_is_a_config_error() {
        let err = GameConfig::from_ron("(width: \"wide\")").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_empty_canvas() {
        let err = GameConfig::from_ron("(width: 0)").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));

        let config = GameConfig { max_frame_delta: 0.0, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CONFIG_PATH);
        let config = GameConfig::load(path).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_clamp_delta() {
        let config = GameConfig::default();
        assert_eq!(config.clamp_delta(0.5), 0.05);
        assert_eq!(config.clamp_delta(0.01), 0.01);
        assert_eq!(config.clamp_delta(-1.0), 0.0);
    }

    #[test]
    fn test_asset_path() {
        let mut config = GameConfig::default();
        assert_eq!(config.asset_path("images/sky.png"), "assets/images/sky.png");
        config.asset_root = "data/".to_string();
        assert_eq!(config.asset_path("images/sky.png"), "data/images/sky.png");
        config.asset_root.clear();
        assert_eq!(config.asset_path("images/sky.png"), "images/sky.png");
    }

    #[test]
    fn test_fps_limit_frame_time() {
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
        assert!(FpsLimit::Fps60.frame_time().unwrap() < FpsLimit::Fps30.frame_time().unwrap());
    }
}
