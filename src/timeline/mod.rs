//! Ordered silence/talk timeline and per-frame track generation.
//!
//! ```text
//! talk clips ──▶ ┌─────────────────┐
//!                │ TimelineBuilder │──build()──▶ Timeline ──▶ frames ──▶ text
//! silences  ───▶ └─────────────────┘
//! ```
//!
//! Segments are stored in order; the successor of segment `i` is `i + 1`.

pub mod builder;
pub mod rotation;
pub mod segment;

pub use builder::{TalkStyle, TimelineBuilder};
pub use rotation::ChunkRotation;
pub use segment::{Segment, SegmentKind, SpeechClip};

use crate::config::TimingConfig;
use crate::frames::bank::FrameId;
use crate::frames::format::{FrameLayout, format_frames};

/// The built, read-only timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    segments: Vec<Segment>,
    timing: TimingConfig,
    silent_frame: FrameId,
}

/// A segment together with its successor.
#[derive(Debug, Clone, Copy)]
pub struct SegmentView<'a> {
    pub segment: &'a Segment,
    pub next: Option<&'a Segment>,
    timeline: &'a Timeline,
}

impl SegmentView<'_> {
    pub fn effective_duration(&self) -> f64 {
        self.segment
            .effective_duration(self.next, self.timeline.timing())
    }

    pub fn frame_count(&self) -> usize {
        self.segment.frame_count(self.next, self.timeline.timing())
    }

    pub fn frames(&self) -> Vec<FrameId> {
        self.segment
            .frames(self.next, self.timeline.timing(), &self.timeline.silent_frame)
    }
}

impl Timeline {
    pub(crate) fn new(segments: Vec<Segment>, timing: TimingConfig, silent_frame: FrameId) -> Self {
        Self {
            segments,
            timing,
            silent_frame,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// The segment at `index` paired with its successor.
    pub fn view(&self, index: usize) -> Option<SegmentView<'_>> {
        let segment = self.segments.get(index)?;
        Some(SegmentView {
            segment,
            next: self.segments.get(index + 1),
            timeline: self,
        })
    }

    /// All segments in order, each paired with its successor.
    pub fn views(&self) -> impl Iterator<Item = SegmentView<'_>> + '_ {
        (0..self.segments.len()).filter_map(|index| self.view(index))
    }

    /// Frames of every segment, one list per segment.
    pub fn segment_frames(&self) -> Vec<Vec<FrameId>> {
        self.views()
            .map(|view| {
                let frames = view.frames();
                tracing::debug!(
                    kind = ?view.segment.kind(),
                    duration = view.segment.duration(),
                    effective = view.effective_duration(),
                    frames = frames.len(),
                    "Segment frames"
                );
                frames
            })
            .collect()
    }

    /// The full frame track.
    pub fn all_frames(&self) -> Vec<FrameId> {
        self.segment_frames().into_iter().flatten().collect()
    }

    /// Total frames across all segments, without materializing them.
    pub fn frame_count(&self) -> usize {
        self.views().map(|view| view.frame_count()).sum()
    }

    /// The frame track as text, wrapping after `width` values per line.
    pub fn formatted_frames(&self, width: usize, layout: FrameLayout) -> String {
        format_frames(&self.segment_frames(), width, layout)
    }

    /// Sum of raw segment durations in seconds.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(Segment::duration).sum()
    }
}
