//! Error types for mouthtrack.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MouthtrackError {
    // Timeline construction errors
    #[error("Invalid segment: {reason}")]
    InvalidSegment { reason: String },

    // Frame bank errors
    #[error("Frame bank has no talk chunks")]
    EmptyChunkPool,

    #[error("Talk chunk {index} is empty")]
    EmptyChunk { index: usize },

    #[error("Frame bank not found at {path}")]
    FrameBankNotFound { path: String },

    #[error("Failed to parse frame bank: {message}")]
    FrameBankParse { message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio errors
    #[error("Audio decode failed: {message}")]
    AudioDecode { message: String },

    #[error("Audio export failed: {message}")]
    AudioExport { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MouthtrackError>;
