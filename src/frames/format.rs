//! Text rendering of frame tracks.
//!
//! Every value is followed by a comma, including the last one on a line.

use crate::frames::bank::FrameId;
use serde::{Deserialize, Serialize};

/// How line breaks are placed in the rendered track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameLayout {
    /// Line accounting restarts at every segment boundary; every segment
    /// ends its last line with a newline.
    #[default]
    PerSegment,
    /// One running count across the whole track.
    Continuous,
}

/// Render per-segment frame lists, wrapping after `width` values within each
/// segment.
///
/// A segment with no frames contributes nothing.
pub fn format_per_segment<S: AsRef<[FrameId]>>(segments: &[S], width: usize) -> String {
    let width = width.max(1);
    let mut out = String::new();
    for segment in segments {
        for line in segment.as_ref().chunks(width) {
            for frame in line {
                push_frame(&mut out, frame);
            }
            out.push('\n');
        }
    }
    out
}

/// Render a flat frame list, breaking the line after every `width` values.
///
/// No newline follows a final partial line.
pub fn format_continuous(frames: &[FrameId], width: usize) -> String {
    let width = width.max(1);
    let mut out = String::new();
    for (i, frame) in frames.iter().enumerate() {
        push_frame(&mut out, frame);
        if (i + 1) % width == 0 {
            out.push('\n');
        }
    }
    out
}

fn push_frame(out: &mut String, frame: &FrameId) {
    out.push_str(&frame.to_string());
    out.push(',');
}

/// Render segments using the given layout.
pub fn format_frames<S: AsRef<[FrameId]>>(
    segments: &[S],
    width: usize,
    layout: FrameLayout,
) -> String {
    match layout {
        FrameLayout::PerSegment => format_per_segment(segments, width),
        FrameLayout::Continuous => {
            let flat: Vec<FrameId> = segments
                .iter()
                .flat_map(|s| s.as_ref().iter().cloned())
                .collect();
            format_continuous(&flat, width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(raw: &[u32]) -> Vec<FrameId> {
        raw.iter().copied().map(FrameId::Index).collect()
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split([',', '\n'])
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn per_segment_wraps_each_segment_independently() {
        let segments = vec![idx(&[0, 0, 0]), idx(&[1, 2, 3, 4, 5])];
        let text = format_per_segment(&segments, 2);
        assert_eq!(text, "0,0,\n0,\n1,2,\n3,4,\n5,\n");
    }

    #[test]
    fn per_segment_exact_multiple_has_no_blank_line() {
        let segments = vec![idx(&[7, 7, 7, 7])];
        assert_eq!(format_per_segment(&segments, 2), "7,7,\n7,7,\n");
    }

    #[test]
    fn per_segment_skips_empty_segments() {
        let segments = vec![idx(&[]), idx(&[4]), idx(&[])];
        assert_eq!(format_per_segment(&segments, 32), "4,\n");
    }

    #[test]
    fn per_segment_default_width_breaks_after_32() {
        let segments = vec![vec![FrameId::Index(0); 33]];
        let text = format_per_segment(&segments, 32);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches(',').count(), 32);
        assert_eq!(lines[1], "0,");
    }

    #[test]
    fn continuous_carries_count_across_segments() {
        let segments = vec![idx(&[0, 0, 0]), idx(&[1, 2, 3])];
        let text = format_frames(&segments, 2, FrameLayout::Continuous);
        assert_eq!(text, "0,0,\n0,1,\n2,3,\n");
    }

    #[test]
    fn continuous_partial_last_line_has_no_newline() {
        assert_eq!(format_continuous(&idx(&[1, 2, 3]), 2), "1,2,\n3,");
    }

    #[test]
    fn named_frames_render_verbatim() {
        let segments = vec![vec![FrameId::from("rest"), FrameId::Index(3)]];
        assert_eq!(format_per_segment(&segments, 32), "rest,3,\n");
    }

    #[test]
    fn tokens_round_trip_to_flat_sequence() {
        let segments = vec![idx(&[0; 40]), idx(&[1, 2, 3, 4, 5, 6, 7]), idx(&[0; 31])];
        let flat: Vec<String> = segments.iter().flatten().map(|f| f.to_string()).collect();
        for layout in [FrameLayout::PerSegment, FrameLayout::Continuous] {
            assert_eq!(tokens(&format_frames(&segments, 32, layout)), flat);
        }
    }

    #[test]
    fn zero_width_is_treated_as_one() {
        assert_eq!(format_per_segment(&[idx(&[1, 2])], 0), "1,\n2,\n");
    }
}
