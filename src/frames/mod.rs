//! Frame identifiers, the frame bank, and track text rendering.

pub mod bank;
pub mod format;

pub use bank::{FrameBank, FrameId};
pub use format::{FrameLayout, format_continuous, format_frames, format_per_segment};
