//! mouthtrack - Lip-sync frame tracks from voice recordings
//!
//! Splits a recording into silence and talk, then emits one mouth pose per
//! animation frame.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod frames;
pub mod logging;
#[cfg(feature = "cli")]
pub mod output;
pub mod pipeline;
pub mod timeline;

// Timeline core
pub use timeline::{Segment, SegmentKind, SpeechClip, TalkStyle, Timeline, TimelineBuilder};

// Frames
pub use frames::{FrameBank, FrameId, FrameLayout};

// Audio
pub use audio::{AudioClip, AudioTrack, TimeRange};

// Pipeline
pub use pipeline::{Detection, RunReport};

// Error handling
pub use error::{MouthtrackError, Result};

// Config
pub use config::{Config, OutputConfig, SilenceConfig, TimingConfig};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
