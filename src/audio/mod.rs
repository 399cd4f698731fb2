//! Audio collaborators: WAV decoding, clip export, and silence detection.

pub mod silence;
pub mod wav;

pub use silence::{
    TimeRange, detect_nonsilent, detect_silence, slice_ranges, split_on_silence,
};
pub use wav::{AudioClip, AudioTrack};
