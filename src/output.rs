//! Terminal rendering of run summaries and detection results.

use crate::pipeline::{Detection, RunReport};
use owo_colors::OwoColorize;

/// Render the end-of-run summary.
///
/// The expected count comes from the frame bank's reference animation and is
/// informational only.
pub fn render_report(report: &RunReport, color: bool) -> String {
    let mut out = String::new();
    let generated = report.generated_frames.to_string();
    let generated = if color {
        generated.green().to_string()
    } else {
        generated
    };

    out.push_str(&format!("Original frames: {}\n", report.expected_frames));
    out.push_str(&format!(
        "Generated frames in {}: {}\n",
        report.out_path.display(),
        generated
    ));
    out.push_str(&format!(
        "Segments: {} ({:.3}s)\n",
        report.segments, report.total_duration_seconds
    ));
    if !report.exported_clips.is_empty() {
        out.push_str(&format!(
            "Exported clips: {}\n",
            report.exported_clips.len()
        ));
    }
    out
}

/// Render detected spans as pretty JSON.
pub fn render_detection_json(detection: &Detection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(detection)
}

/// Render detected spans, one per line, in track order.
pub fn render_detection(detection: &Detection, color: bool) -> String {
    let mut spans: Vec<(u64, u64, bool)> = detection
        .silences
        .iter()
        .map(|r| (r.start_ms, r.end_ms, true))
        .chain(detection.speech.iter().map(|r| (r.start_ms, r.end_ms, false)))
        .collect();
    spans.sort_by_key(|&(start, _, _)| start);

    let mut out = format!("Track: {} ms\n", detection.track_ms);
    for (start, end, silent) in spans {
        let label = match (silent, color) {
            (true, true) => "silence".dimmed().to_string(),
            (true, false) => "silence".to_string(),
            (false, true) => "speech ".bold().to_string(),
            (false, false) => "speech ".to_string(),
        };
        out.push_str(&format!("  {label} {start:>8} - {end:>8} ms\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::silence::TimeRange;
    use std::path::PathBuf;

    #[test]
    fn report_lists_expected_and_generated() {
        let report = RunReport {
            expected_frames: 120,
            generated_frames: 60,
            segments: 2,
            total_duration_seconds: 2.0,
            out_path: PathBuf::from("out.txt"),
            exported_clips: vec![PathBuf::from("chunk/0.wav")],
        };
        let text = render_report(&report, false);

        assert!(text.contains("Original frames: 120"));
        assert!(text.contains("Generated frames in out.txt: 60"));
        assert!(text.contains("Segments: 2 (2.000s)"));
        assert!(text.contains("Exported clips: 1"));
    }

    #[test]
    fn detection_is_listed_in_track_order() {
        let detection = Detection {
            track_ms: 2000,
            silences: vec![TimeRange {
                start_ms: 0,
                end_ms: 700,
            }],
            speech: vec![TimeRange {
                start_ms: 700,
                end_ms: 2000,
            }],
        };
        let text = render_detection(&detection, false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Track: 2000 ms");
        assert!(lines[1].contains("silence"));
        assert!(lines[2].contains("speech"));
        assert!(lines[2].contains("2000"));
    }

    #[test]
    fn detection_json_keeps_field_names() {
        let detection = Detection {
            track_ms: 1000,
            silences: Vec::new(),
            speech: vec![TimeRange {
                start_ms: 0,
                end_ms: 1000,
            }],
        };
        let json = render_detection_json(&detection).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["track_ms"], 1000);
        assert_eq!(value["silences"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["speech"][0]["end_ms"], 1000);
    }
}
