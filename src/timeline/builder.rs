//! Timeline construction.
//!
//! Talk clips and silence intervals arrive as two independent lists from the
//! silence detector. The builder wraps each entry in a [`Segment`], stages the
//! two kinds separately, then interleaves them into one ordered timeline.

use crate::audio::silence::TimeRange;
use crate::config::TimingConfig;
use crate::error::Result;
use crate::frames::bank::{FrameBank, FrameId};
use crate::timeline::Timeline;
use crate::timeline::rotation::ChunkRotation;
use crate::timeline::segment::{Segment, SpeechClip};
use serde::{Deserialize, Serialize};

/// Where talk segments take their frames from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalkStyle {
    /// Rotate through the bank's talk chunks.
    #[default]
    Chunks,
    /// Hold the open-mouth pose for the whole talk segment.
    OpenMouth,
}

/// Stages silence and talk segments and interleaves them into a [`Timeline`].
#[derive(Debug)]
pub struct TimelineBuilder<'a> {
    silence_is_first: bool,
    silences: Vec<Segment>,
    talks: Vec<Segment>,
    rotation: ChunkRotation<'a>,
    talk_style: TalkStyle,
    open_mouth_frame: &'a FrameId,
    silent_frame: &'a FrameId,
    timing: TimingConfig,
}

impl<'a> TimelineBuilder<'a> {
    /// # Errors
    /// `EmptyChunkPool` if the bank has no talk chunks.
    pub fn new(bank: &'a FrameBank, silence_is_first: bool, timing: TimingConfig) -> Result<Self> {
        Ok(Self {
            silence_is_first,
            silences: Vec::new(),
            talks: Vec::new(),
            rotation: ChunkRotation::new(bank.talk_chunks())?,
            talk_style: TalkStyle::default(),
            open_mouth_frame: bank.open_mouth_frame(),
            silent_frame: bank.silent_frame(),
            timing,
        })
    }

    pub fn with_talk_style(mut self, talk_style: TalkStyle) -> Self {
        self.talk_style = talk_style;
        self
    }

    pub fn silence_is_first(&self) -> bool {
        self.silence_is_first
    }

    pub fn silences(&self) -> &[Segment] {
        &self.silences
    }

    pub fn talks(&self) -> &[Segment] {
        &self.talks
    }

    fn next_talk_chunk(&mut self) -> Vec<FrameId> {
        match self.talk_style {
            TalkStyle::Chunks => {
                let chunk = self.rotation.next_chunk().to_vec();
                tracing::debug!(
                    len = chunk.len(),
                    next_cursor = self.rotation.cursor(),
                    "Talk chunk assigned"
                );
                chunk
            }
            TalkStyle::OpenMouth => vec![self.open_mouth_frame.clone()],
        }
    }

    /// Stage a talk segment for `clip`, the `index`-th speech clip.
    pub fn add_talk(&mut self, clip: &dyn SpeechClip, index: usize) -> Result<()> {
        let is_first = !self.silence_is_first && index == 0;
        let talk_data = self.next_talk_chunk();
        self.talks.push(Segment::talk(clip, talk_data, is_first)?);
        Ok(())
    }

    /// Stage a silence segment of `duration` seconds, the `index`-th silence.
    pub fn add_silence(&mut self, duration: f64, index: usize) -> Result<()> {
        let is_first = self.silence_is_first && index == 0;
        self.silences.push(Segment::silence(duration, is_first)?);
        Ok(())
    }

    /// Stage one talk segment per speech clip, in order.
    pub fn parse_speech_clips<C: SpeechClip>(&mut self, clips: &[C]) -> Result<()> {
        for (index, clip) in clips.iter().enumerate() {
            self.add_talk(clip, index)?;
        }
        Ok(())
    }

    /// Stage one silence segment per detected interval, in order.
    pub fn parse_silence_list(&mut self, intervals: &[TimeRange]) -> Result<()> {
        for (index, interval) in intervals.iter().enumerate() {
            self.add_silence(interval.duration_seconds(), index)?;
        }
        Ok(())
    }

    /// Interleave the staged segments into the final timeline.
    ///
    /// Turns alternate starting with silence when `silence_is_first`. Once one
    /// side runs out its turns are skipped, so the rest of the other side is
    /// appended in order.
    pub fn build(self) -> Timeline {
        let silence_count = self.silences.len();
        let talk_count = self.talks.len();

        let mut silences = self.silences.into_iter();
        let mut talks = self.talks.into_iter();
        let mut have_silence = silence_count > 0;
        let mut have_talks = talk_count > 0;
        let mut turn_silence = self.silence_is_first;
        let mut segments = Vec::with_capacity(silence_count + talk_count);

        while have_silence || have_talks {
            if turn_silence {
                turn_silence = false;
                match silences.next() {
                    Some(segment) => segments.push(segment),
                    None => have_silence = false,
                }
            } else {
                turn_silence = true;
                match talks.next() {
                    Some(segment) => segments.push(segment),
                    None => have_talks = false,
                }
            }
        }

        tracing::debug!(
            silences = silence_count,
            talks = talk_count,
            silence_first = self.silence_is_first,
            "Timeline interleaved"
        );

        Timeline::new(segments, self.timing, self.silent_frame.clone())
    }
}
