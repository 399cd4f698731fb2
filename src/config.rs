use crate::defaults;
use crate::error::{MouthtrackError, Result};
use crate::frames::format::FrameLayout;
use crate::timeline::builder::TalkStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub timing: TimingConfig,
    pub silence: SilenceConfig,
    pub frames: FramesConfig,
    pub output: OutputConfig,
}

/// Frame timing: how segment durations become frame counts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub fps: u32,
    /// Seconds a talk segment borrows from the following silence.
    pub talk_extra_bleed_sec: f64,
}

/// Silence detection tunables
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SilenceConfig {
    pub min_silence_len_ms: u32,
    pub silence_thresh_db: f64,
    pub seek_step_ms: u32,
}

/// Frame source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct FramesConfig {
    /// Frame bank TOML file. The built-in bank is used when unset.
    pub bank: Option<PathBuf>,
    pub talk_style: TalkStyle,
}

/// Output files and text layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub out_path: PathBuf,
    pub chunk_dir: PathBuf,
    pub export_chunks: bool,
    pub max_inline_frame: usize,
    pub layout: FrameLayout,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps: defaults::FPS,
            talk_extra_bleed_sec: defaults::TALK_EXTRA_BLEED_SEC,
        }
    }
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            min_silence_len_ms: defaults::MIN_SILENCE_LEN_MS,
            silence_thresh_db: defaults::SILENCE_THRESH_DB,
            seek_step_ms: defaults::SEEK_STEP_MS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(defaults::OUT_FILE),
            chunk_dir: PathBuf::from(defaults::CHUNK_DIR),
            export_chunks: true,
            max_inline_frame: defaults::MAX_INLINE_FRAME,
            layout: FrameLayout::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file doesn't exist
    ///
    /// Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(MouthtrackError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - MOUTHTRACK_FPS → timing.fps
    /// - MOUTHTRACK_SILENCE_THRESH_DB → silence.silence_thresh_db
    /// - MOUTHTRACK_FRAME_BANK → frames.bank
    ///
    /// Unparseable numbers are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(fps) = std::env::var("MOUTHTRACK_FPS")
            && let Ok(fps) = fps.trim().parse()
        {
            self.timing.fps = fps;
        }

        if let Ok(thresh) = std::env::var("MOUTHTRACK_SILENCE_THRESH_DB")
            && let Ok(thresh) = thresh.trim().parse()
        {
            self.silence.silence_thresh_db = thresh;
        }

        if let Ok(bank) = std::env::var("MOUTHTRACK_FRAME_BANK")
            && !bank.is_empty()
        {
            self.frames.bank = Some(PathBuf::from(bank));
        }

        self
    }

    /// Reject values that would make frame generation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.timing.fps == 0 {
            return Err(invalid("timing.fps", "must be positive"));
        }
        if !(self.timing.talk_extra_bleed_sec >= 0.0) {
            return Err(invalid(
                "timing.talk_extra_bleed_sec",
                "must be zero or positive",
            ));
        }
        if self.silence.min_silence_len_ms == 0 {
            return Err(invalid("silence.min_silence_len_ms", "must be positive"));
        }
        if self.silence.seek_step_ms == 0 {
            return Err(invalid("silence.seek_step_ms", "must be positive"));
        }
        if !(self.silence.silence_thresh_db <= 0.0) {
            return Err(invalid(
                "silence.silence_thresh_db",
                "must be at or below 0 dBFS",
            ));
        }
        if self.output.max_inline_frame == 0 {
            return Err(invalid("output.max_inline_frame", "must be positive"));
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/mouthtrack/config.toml on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mouthtrack").join("config.toml"))
    }
}

fn invalid(key: &str, message: &str) -> MouthtrackError {
    MouthtrackError::ConfigInvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
