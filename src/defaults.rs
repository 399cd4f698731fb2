//! Default configuration constants for mouthtrack.
//!
//! Changing any of these changes the exact frame track produced for a given
//! recording, so downstream animations built against one set of values will
//! drift against another.

/// Animation frame rate in frames per second.
pub const FPS: u32 = 30;

/// Seconds of the following silence that a talk segment borrows.
///
/// Mouth movement trails off into the pause instead of snapping shut the
/// instant speech audio ends. The silence gives the same slice back.
pub const TALK_EXTRA_BLEED_SEC: f64 = 0.5;

/// Minimum length of a silent span, in milliseconds.
pub const MIN_SILENCE_LEN_MS: u32 = 600;

/// Loudness at or below which audio counts as silence, in dBFS.
pub const SILENCE_THRESH_DB: f64 = -30.0;

/// Step between successive silence probe windows, in milliseconds.
pub const SEEK_STEP_MS: u32 = 1;

/// Frame identifiers per line in the formatted output.
pub const MAX_INLINE_FRAME: usize = 32;

/// Length of generated talk chunks when a frame bank lists only talk frames.
pub const TALK_CHUNK_LEN: usize = 8;

/// Output text file name.
pub const OUT_FILE: &str = "out.txt";

/// Directory that receives exported speech clips.
pub const CHUNK_DIR: &str = "chunk";

/// Peak amplitude of a 16-bit PCM sample.
pub const MAX_AMPLITUDE_I16: f64 = 32768.0;
