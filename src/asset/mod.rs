//! Resource loading
//!
//! The load phase is split in two:
//! - `load` builds a `ResourceSet` from the manifest (pure, no GPU)
//! - `load_textures` decodes every registered file into a `TextureCache`
//!
//! Setup only needs the `ResourceSet`; the renderer needs the textures.
//!
//! ```text
//! assets/
//! ├── config.ron        # optional GameConfig
//! └── images/           # sprite sheets (32x48 frames) and backgrounds
//! ```

mod library;
mod manifest;
mod textures;

pub use library::{load, ResourceSet};
pub use manifest::{default_manifest, ResourceSpec};
pub use textures::{load_textures, TextureCache};
