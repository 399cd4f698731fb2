//! Lip-sync pipeline implementation.
//!
//! Orchestrates the complete audio-to-frames flow:
//! decode → detect silence → build timeline → frames → write

use crate::audio::silence::{TimeRange, detect_silence, nonsilent_between, slice_ranges};
use crate::audio::wav::{AudioClip, AudioTrack};
use crate::config::Config;
use crate::error::Result;
use crate::frames::bank::FrameBank;
use crate::timeline::{Timeline, TimelineBuilder};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Silence and speech spans found in one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub track_ms: u64,
    pub silences: Vec<TimeRange>,
    pub speech: Vec<TimeRange>,
}

impl Detection {
    /// True when the track opens with silence.
    ///
    /// A track with no silence at all is treated as opening with talk.
    pub fn silence_is_first(&self) -> bool {
        self.silences.first().is_some_and(|r| r.start_ms == 0)
    }
}

/// Everything generated from one track, before anything is written.
#[derive(Debug, Clone)]
pub struct Generated {
    pub detection: Detection,
    pub clips: Vec<AudioClip>,
    pub timeline: Timeline,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Length of the bank's reference animation.
    pub expected_frames: usize,
    pub generated_frames: usize,
    pub segments: usize,
    pub total_duration_seconds: f64,
    pub out_path: PathBuf,
    pub exported_clips: Vec<PathBuf>,
}

/// Find silence and speech spans in `track`.
pub fn detect(track: &AudioTrack, config: &Config) -> Detection {
    let track_ms = track.duration_ms();
    let silences = detect_silence(track, &config.silence);
    let speech = nonsilent_between(&silences, track_ms);
    Detection {
        track_ms,
        silences,
        speech,
    }
}

/// Build the timeline for `track` without touching the filesystem.
pub fn generate(track: &AudioTrack, config: &Config, bank: &FrameBank) -> Result<Generated> {
    let detection = detect(track, config);
    let clips = slice_ranges(track, &detection.speech);

    tracing::info!(
        silences = detection.silences.len(),
        speech_clips = clips.len(),
        silence_first = detection.silence_is_first(),
        "Track segmented"
    );

    let mut builder = TimelineBuilder::new(bank, detection.silence_is_first(), config.timing)?
        .with_talk_style(config.frames.talk_style);
    builder.parse_speech_clips(&clips)?;
    builder.parse_silence_list(&detection.silences)?;
    let timeline = builder.build();

    Ok(Generated {
        detection,
        clips,
        timeline,
    })
}

/// Write each clip to `<dir>/<index>.wav`, creating `dir` if needed.
pub fn export_clips(clips: &[AudioClip], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(clips.len());
    for (index, clip) in clips.iter().enumerate() {
        let path = dir.join(format!("{}.wav", index));
        clip.export_wav(&path)?;
        paths.push(path);
    }
    tracing::info!(count = paths.len(), dir = %dir.display(), "Clips exported");
    Ok(paths)
}

/// Run the frames command: decode `input`, generate the frame track, export
/// speech clips, and write the formatted track.
///
/// # Arguments
/// * `config` - Validated configuration
/// * `bank` - Frame bank for this run
/// * `input` - WAV file to process
///
/// # Errors
/// Any decode, timeline, or I/O failure aborts the run.
pub fn run(config: &Config, bank: &FrameBank, input: &Path) -> Result<RunReport> {
    config.validate()?;
    bank.validate()?;

    tracing::info!(
        talk_frames = bank.talk_frames().len(),
        talk_chunks = bank.talk_chunks().len(),
        "Frame bank ready"
    );
    tracing::info!(input = %input.display(), "Loading track");
    let track = AudioTrack::open(input)?;
    let generated = generate(&track, config, bank)?;

    let segment_frames = generated.timeline.segment_frames();
    let generated_frames = segment_frames.iter().map(Vec::len).sum();
    let text = crate::frames::format::format_frames(
        &segment_frames,
        config.output.max_inline_frame,
        config.output.layout,
    );

    let exported_clips = if config.output.export_chunks {
        export_clips(&generated.clips, &config.output.chunk_dir)?
    } else {
        Vec::new()
    };

    let out_path = config.output.out_path.clone();
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, text)?;
    tracing::info!(path = %out_path.display(), frames = generated_frames, "Frames written");

    Ok(RunReport {
        expected_frames: bank.reference_frames().len(),
        generated_frames,
        segments: generated.timeline.len(),
        total_duration_seconds: generated.timeline.total_duration(),
        out_path,
        exported_clips,
    })
}
