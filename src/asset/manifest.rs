//! Resource manifest
//!
//! The list of images the game needs, keyed by id. Sprite sheets carry a
//! frame size; plain images (backgrounds, platform tiles) don't.

use serde::{Deserialize, Serialize};

/// Frame width of every character sheet
pub const SHEET_FRAME_WIDTH: u32 = 32;
/// Frame height of every character sheet
pub const SHEET_FRAME_HEIGHT: u32 = 48;

/// Size of a single frame inside a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One entry registered during the load phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Stable id used by setup and the renderer
    pub id: String,
    /// Path relative to the asset root
    pub path: String,
    /// Present for sprite sheets
    #[serde(default)]
    pub frame: Option<FrameSize>,
}

impl ResourceSpec {
    /// A plain image
    pub fn image(id: &str, path: &str) -> Self {
        Self { id: id.to_string(), path: path.to_string(), frame: None }
    }

    /// A sprite sheet sliced into equally sized frames
    pub fn sheet(id: &str, path: &str, frame: FrameSize) -> Self {
        Self { id: id.to_string(), path: path.to_string(), frame: Some(frame) }
    }
}

/// The resources the street level ships with
pub fn default_manifest() -> Vec<ResourceSpec> {
    let frame = FrameSize::new(SHEET_FRAME_WIDTH, SHEET_FRAME_HEIGHT);
    vec![
        ResourceSpec::image("sky", "images/sky.png"),
        ResourceSpec::image("ground", "images/road&border.png"),
        ResourceSpec::image("background_far", "images/City1.png"),
        ResourceSpec::image("background_near", "images/boxes&container.png"),
        ResourceSpec::sheet("player_idle", "images/Player_idle.png", frame),
        ResourceSpec::sheet("player_walk", "images/Player_walk.png", frame),
        ResourceSpec::sheet("player_jump", "images/Player_jump.png", frame),
        ResourceSpec::sheet("player_hurt", "images/Player_hurt.png", frame),
        ResourceSpec::sheet("player_dead", "images/Player_dead.png", frame),
        ResourceSpec::sheet("player_attack", "images/Attack_2.png", frame),
        ResourceSpec::sheet("enemy_idle", "images/Idle.png", frame),
        ResourceSpec::sheet("enemy_walk", "images/Walk.png", frame),
        ResourceSpec::sheet("enemy_attack", "images/Attack_1.png", frame),
        ResourceSpec::sheet("enemy_hurt", "images/Hurt.png", frame),
        ResourceSpec::sheet("enemy_dead", "images/Dead.png", frame),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_shape() {
        let manifest = default_manifest();
        assert_eq!(manifest.len(), 15);
        assert_eq!(manifest.iter().filter(|r| r.frame.is_some()).count(), 11);
        assert!(manifest.iter().all(|r| r.frame.map_or(true, |f| f == FrameSize::new(32, 48))));
    }

    #[test]
    fn test_spec_from_ron_without_frame() {
        let spec: ResourceSpec = ron::from_str("(id: \"sky\", path: \"images/sky.png\")").unwrap();
        assert_eq!(spec, ResourceSpec::image("sky", "images/sky.png"));
    }
}
