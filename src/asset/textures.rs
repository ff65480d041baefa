//! GPU textures for registered resources
//!
//! Decoding goes through macroquad, which works the same on native and WASM.

use std::collections::HashMap;

use macroquad::prelude::*;

use super::library::ResourceSet;
use crate::config::GameConfig;
use crate::error::{GameError, Result};

/// Loaded textures keyed by resource id
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, Texture2D>,
}

impl TextureCache {
    pub fn get(&self, id: &str) -> Option<&Texture2D> {
        self.textures.get(id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }
}

/// Load every registered resource. The first failure aborts loading.
pub async fn load_textures(resources: &ResourceSet, config: &GameConfig) -> Result<TextureCache> {
    let mut cache = TextureCache::default();

    for spec in resources.iter() {
        let path = config.asset_path(&spec.path);
        let texture = load_texture(&path).await.map_err(|source| GameError::TextureLoad {
            id: spec.id.clone(),
            path: path.clone(),
            source,
        })?;
        // Pixel art: keep it crisp
        texture.set_filter(FilterMode::Nearest);
        log::debug!("Loaded texture '{}' ({}x{})", spec.id, texture.width(), texture.height());
        cache.textures.insert(spec.id.clone(), texture);
    }

    log::info!("Loaded {} textures", cache.len());
    Ok(cache)
}
