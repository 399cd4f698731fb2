//! Offline silence detection over a whole track.
//!
//! A probe window of `min_silence_len_ms` slides across the track every
//! `seek_step_ms`. A window is silent when its RMS is at or below the
//! threshold amplitude; overlapping silent windows merge into one range.
//! Speech is whatever lies between the silent ranges.

use crate::audio::wav::{AudioClip, AudioTrack};
use crate::config::SilenceConfig;
use crate::defaults::MAX_AMPLITUDE_I16;
use serde::Serialize;

/// A `[start_ms, end_ms)` span of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl TimeRange {
    pub fn duration_seconds(&self) -> f64 {
        (self.end_ms as f64 - self.start_ms as f64) / 1000.0
    }
}

/// Convert dBFS to a linear amplitude on the 16-bit scale.
pub fn threshold_amplitude(silence_thresh_db: f64) -> f64 {
    10f64.powf(silence_thresh_db / 20.0) * MAX_AMPLITUDE_I16
}

/// Running sums of squared samples for O(1) window RMS.
struct EnergyIndex {
    prefix: Vec<u64>,
}

impl EnergyIndex {
    fn new(samples: &[i16]) -> Self {
        let mut prefix = Vec::with_capacity(samples.len() + 1);
        let mut total = 0u64;
        prefix.push(total);
        for &s in samples {
            let v = i64::from(s);
            total += (v * v) as u64;
            prefix.push(total);
        }
        Self { prefix }
    }

    fn rms(&self, start: usize, end: usize) -> f64 {
        if end <= start {
            return 0.0;
        }
        let energy = self.prefix[end] - self.prefix[start];
        (energy as f64 / (end - start) as f64).sqrt()
    }
}

/// Silent ranges of at least `min_silence_len_ms`, in track order.
///
/// A track shorter than one probe window has no silence.
pub fn detect_silence(track: &AudioTrack, config: &SilenceConfig) -> Vec<TimeRange> {
    let track_ms = track.duration_ms();
    let min_len = u64::from(config.min_silence_len_ms);
    let step = u64::from(config.seek_step_ms.max(1));
    if track_ms < min_len {
        return Vec::new();
    }

    let threshold = threshold_amplitude(config.silence_thresh_db);
    let energy = EnergyIndex::new(track.samples());

    let last_start = track_ms - min_len;
    let mut probe_starts: Vec<u64> = (0..=last_start).step_by(step as usize).collect();
    if last_start % step != 0 {
        probe_starts.push(last_start);
    }

    let silent_starts: Vec<u64> = probe_starts
        .into_iter()
        .filter(|&start| {
            let rms = energy.rms(
                track.sample_index(start),
                track.sample_index(start + min_len),
            );
            rms <= threshold
        })
        .collect();

    let Some((&first, rest)) = silent_starts.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut range_start = first;
    let mut prev = first;
    for &start in rest {
        let continuous = start == prev + step;
        let has_gap = start > prev + min_len;
        if !continuous && has_gap {
            ranges.push(TimeRange {
                start_ms: range_start,
                end_ms: prev + min_len,
            });
            range_start = start;
        }
        prev = start;
    }
    ranges.push(TimeRange {
        start_ms: range_start,
        end_ms: prev + min_len,
    });

    tracing::debug!(
        track_ms,
        threshold,
        ranges = ranges.len(),
        "Silence detected"
    );
    ranges
}

/// Non-silent ranges: the gaps between silent ranges.
///
/// The whole track when nothing is silent; nothing when everything is.
pub fn detect_nonsilent(track: &AudioTrack, config: &SilenceConfig) -> Vec<TimeRange> {
    nonsilent_between(&detect_silence(track, config), track.duration_ms())
}

/// Complement of `silent` within `[0, track_ms)`.
pub fn nonsilent_between(silent: &[TimeRange], track_ms: u64) -> Vec<TimeRange> {
    let Some(last) = silent.last() else {
        return vec![TimeRange {
            start_ms: 0,
            end_ms: track_ms,
        }];
    };
    if silent[0].start_ms == 0 && silent[0].end_ms == track_ms {
        return Vec::new();
    }

    let mut ranges = Vec::with_capacity(silent.len() + 1);
    let mut prev_end = 0;
    for range in silent {
        ranges.push(TimeRange {
            start_ms: prev_end,
            end_ms: range.start_ms,
        });
        prev_end = range.end_ms;
    }
    if last.end_ms != track_ms {
        ranges.push(TimeRange {
            start_ms: prev_end,
            end_ms: track_ms,
        });
    }
    if ranges.first().is_some_and(|r| r.start_ms == 0 && r.end_ms == 0) {
        ranges.remove(0);
    }
    ranges
}

/// Cut the track into speech clips, dropping the silence between them.
pub fn split_on_silence(track: &AudioTrack, config: &SilenceConfig) -> Vec<AudioClip> {
    slice_ranges(track, &detect_nonsilent(track, config))
}

/// One clip per range, in order.
pub fn slice_ranges(track: &AudioTrack, ranges: &[TimeRange]) -> Vec<AudioClip> {
    ranges
        .iter()
        .map(|range| track.slice(range.start_ms, range.end_ms))
        .collect()
}
