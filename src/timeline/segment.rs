//! Timeline segments.
//!
//! A segment is one contiguous stretch of the recording, either silence or
//! talk. It knows its raw duration and where its frames come from; the
//! duration actually animated depends on the segment that follows it, so
//! every duration and frame query takes the successor explicitly.

use crate::config::TimingConfig;
use crate::error::{MouthtrackError, Result};
use crate::frames::bank::FrameId;

/// A speech sub-clip produced by the silence splitter.
///
/// Segments only read the duration; the clip itself stays with the caller.
pub trait SpeechClip {
    fn duration_seconds(&self) -> f64;
}

impl SpeechClip for f64 {
    fn duration_seconds(&self) -> f64 {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Silence,
    Talk,
}

#[derive(Debug, Clone, PartialEq)]
enum FrameSource {
    Silence,
    Talk(Vec<FrameId>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Seconds.
    duration: f64,
    is_first: bool,
    source: FrameSource,
}

impl Segment {
    /// Creates a silence segment.
    ///
    /// # Errors
    /// `InvalidSegment` unless `duration` is finite and positive.
    pub fn silence(duration: f64, is_first: bool) -> Result<Self> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(MouthtrackError::InvalidSegment {
                reason: format!("silence needs a positive duration, got {}", duration),
            });
        }
        Ok(Self {
            duration,
            is_first,
            source: FrameSource::Silence,
        })
    }

    /// Creates a talk segment lasting exactly as long as `voice`.
    ///
    /// # Errors
    /// `InvalidSegment` if the voice clip is empty or `talk_data` has no frames.
    pub fn talk(voice: &dyn SpeechClip, talk_data: Vec<FrameId>, is_first: bool) -> Result<Self> {
        let duration = voice.duration_seconds();
        if !(duration.is_finite() && duration > 0.0) {
            return Err(MouthtrackError::InvalidSegment {
                reason: format!("talk needs a non-empty voice clip, got {} s", duration),
            });
        }
        if talk_data.is_empty() {
            return Err(MouthtrackError::InvalidSegment {
                reason: "talk needs at least one talk frame".to_string(),
            });
        }
        Ok(Self {
            duration,
            is_first,
            source: FrameSource::Talk(talk_data),
        })
    }

    pub fn kind(&self) -> SegmentKind {
        match self.source {
            FrameSource::Silence => SegmentKind::Silence,
            FrameSource::Talk(_) => SegmentKind::Talk,
        }
    }

    pub fn is_silence(&self) -> bool {
        self.kind() == SegmentKind::Silence
    }

    pub fn is_talk(&self) -> bool {
        self.kind() == SegmentKind::Talk
    }

    /// Raw duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_first(&self) -> bool {
        self.is_first
    }

    /// The talk chunk assigned at construction; empty for silence.
    pub fn talk_data(&self) -> &[FrameId] {
        match &self.source {
            FrameSource::Silence => &[],
            FrameSource::Talk(chunk) => chunk,
        }
    }

    /// Duration used for frame counting, with the bleed applied.
    ///
    /// Talk followed by more than one bleed of silence gains a bleed; silence
    /// that is neither first nor last and longer than a bleed loses one. The
    /// last segment is never adjusted.
    pub fn effective_duration(&self, next: Option<&Segment>, timing: &TimingConfig) -> f64 {
        let Some(next) = next else {
            return self.duration;
        };
        let bleed = timing.talk_extra_bleed_sec;

        match self.source {
            FrameSource::Silence if !self.is_first && self.duration > bleed => {
                self.duration - bleed
            }
            FrameSource::Talk(_) if next.duration > bleed => self.duration + bleed,
            _ => self.duration,
        }
    }

    /// Number of frames this segment covers.
    ///
    /// Rounds half to even: 22.5 frames become 22, 23.5 become 24.
    pub fn frame_count(&self, next: Option<&Segment>, timing: &TimingConfig) -> usize {
        let frames = self.effective_duration(next, timing) * f64::from(timing.fps);
        frames.round_ties_even().max(0.0) as usize
    }

    /// Frames for this segment, exactly `frame_count` long.
    ///
    /// Silence repeats `silent_frame`; talk cycles its chunk from the start.
    pub fn frames(
        &self,
        next: Option<&Segment>,
        timing: &TimingConfig,
        silent_frame: &FrameId,
    ) -> Vec<FrameId> {
        let count = self.frame_count(next, timing);
        match &self.source {
            FrameSource::Silence => vec![silent_frame.clone(); count],
            FrameSource::Talk(chunk) => cycle_to_len(chunk, count),
        }
    }
}

/// Repeat `chunk` end to end and cut it at `len`.
///
/// An empty chunk yields an empty sequence.
pub fn cycle_to_len(chunk: &[FrameId], len: usize) -> Vec<FrameId> {
    chunk.iter().cycle().take(len).cloned().collect()
}
