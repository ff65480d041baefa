//! Error type shared by the load and setup phases.
//!
//! The frame phase never fails; everything that can go wrong happens
//! before the first tick and is fatal to the session.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("resource '{0}' registered twice")]
    DuplicateResource(String),

    #[error("resource '{0}' is not loaded")]
    MissingResource(String),

    #[error("resource '{0}' has no frame size, it cannot back an animation")]
    NotASpriteSheet(String),

    #[error("failed to load texture '{id}' from {path}: {source}")]
    TextureLoad {
        id: String,
        path: String,
        #[source]
        source: macroquad::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
