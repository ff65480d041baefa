//! Sprite Animation
//!
//! Clips are registered once in an `AnimationLibrary` during setup. Each
//! entity owns an `Animator` that tracks which clip is active and where
//! playback is. An animator only ever has one current clip.

use std::collections::HashMap;

use crate::asset::ResourceSet;
use crate::error::{GameError, Result};

/// How many times a clip plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop until another clip is played
    Forever,
    /// Play once, then repeat `n` more times, then hold the last frame
    Times(u32),
}

impl Repeat {
    /// Convert the sprite-tool convention (-1 = forever, n = repeat n times)
    pub fn from_count(count: i32) -> Self {
        if count < 0 {
            Repeat::Forever
        } else {
            Repeat::Times(count as u32)
        }
    }
}

/// A named sequence of frames from one sprite sheet
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub key: String,
    /// Resource id of the sheet the frames come from
    pub sheet: String,
    /// Frame indices into the sheet, in playback order
    pub frames: Vec<u32>,
    /// Frames per second
    pub frame_rate: f32,
    pub repeat: Repeat,
}

impl AnimationClip {
    /// Clip spanning frames `start..=end` of a sheet
    pub fn range(key: &str, sheet: &str, start: u32, end: u32, frame_rate: f32, repeat: Repeat) -> Self {
        Self {
            key: key.to_string(),
            sheet: sheet.to_string(),
            frames: (start..=end).collect(),
            frame_rate,
            repeat,
        }
    }

    /// Single-frame clip showing frame 0, played once
    pub fn still(key: &str, sheet: &str, frame_rate: f32) -> Self {
        Self::range(key, sheet, 0, 0, frame_rate, Repeat::Times(0))
    }

    /// Seconds each frame stays on screen
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate
    }
}

/// All registered clips, keyed by clip key
#[derive(Debug, Default)]
pub struct AnimationLibrary {
    clips: HashMap<String, AnimationClip>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip. The sheet must be a loaded sprite sheet.
    pub fn register(&mut self, clip: AnimationClip, resources: &ResourceSet) -> Result<()> {
        resources.require_sheet(&clip.sheet)?;
        if clip.frames.is_empty() || !(clip.frame_rate > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "clip '{}' needs at least one frame and a positive frame rate",
                clip.key
            )));
        }
        self.clips.insert(clip.key.clone(), clip);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AnimationClip> {
        self.clips.get(key)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }
}

/// Playback state for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    /// Key of the active clip
    current: String,
    /// Position within the clip's frame list
    cursor: usize,
    /// Time accumulated on the current frame
    elapsed: f32,
    /// Completed passes through the clip
    passes: u32,
    /// Non-looping clip reached its end and is holding the last frame
    finished: bool,
}

impl Animator {
    /// Start with a clip already playing
    pub fn new(key: &str) -> Self {
        Self {
            current: key.to_string(),
            cursor: 0,
            elapsed: 0.0,
            passes: 0,
            finished: false,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn is_current(&self, key: &str) -> bool {
        self.current == key
    }

    pub fn is_playing(&self) -> bool {
        !self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Play a clip from its first frame.
    ///
    /// With `ignore_if_playing`, a request for the clip that is already
    /// playing is a no-op. A finished clip always restarts.
    /// Returns true if playback (re)started.
    pub fn play(&mut self, key: &str, ignore_if_playing: bool) -> bool {
        if ignore_if_playing && self.is_playing() && self.current == key {
            return false;
        }
        *self = Animator::new(key);
        true
    }

    /// Sheet frame index currently shown
    pub fn frame(&self, library: &AnimationLibrary) -> u32 {
        library
            .get(&self.current)
            .and_then(|clip| clip.frames.get(self.cursor).copied())
            .unwrap_or(0)
    }

    /// Advance playback by `dt` seconds
    pub fn update(&mut self, dt: f32, library: &AnimationLibrary) {
        if self.finished {
            return;
        }
        let Some(clip) = library.get(&self.current) else {
            return;
        };

        let duration = clip.frame_duration();
        self.elapsed += dt;
        while self.elapsed >= duration && !self.finished {
            self.elapsed -= duration;
            self.step(clip);
        }
    }

    fn step(&mut self, clip: &AnimationClip) {
        if self.cursor + 1 < clip.frames.len() {
            self.cursor += 1;
            return;
        }

        // Last frame's time is up
        self.passes += 1;
        match clip.repeat {
            Repeat::Forever => self.cursor = 0,
            Repeat::Times(n) if self.passes <= n => self.cursor = 0,
            Repeat::Times(_) => {
                self.finished = true;
                self.elapsed = 0.0;
            }
        }
    }
}
