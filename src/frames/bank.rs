//! Frame bank: the fixed set of mouth poses a track is assembled from.
//!
//! A bank is loaded once per run and never changes afterwards. It provides
//! the silence pose, the open-mouth pose, the flat list of talk poses, and the
//! pool of pre-grouped talk chunks that talk segments draw from.

use crate::defaults;
use crate::error::{MouthtrackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// One animation pose identifier.
///
/// Banks may number their poses or name them; both render verbatim in the
/// output text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameId {
    Index(u32),
    Name(String),
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameId::Index(index) => write!(f, "{}", index),
            FrameId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for FrameId {
    fn from(index: u32) -> Self {
        FrameId::Index(index)
    }
}

impl From<&str> for FrameId {
    fn from(name: &str) -> Self {
        FrameId::Name(name.to_string())
    }
}

/// On-disk layout of a frame bank.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrameBankFile {
    silent_frame: FrameId,
    open_mouth_frame: FrameId,
    #[serde(default)]
    talk_frames: Vec<FrameId>,
    talk_chunks: Option<Vec<Vec<FrameId>>>,
    chunk_len: Option<usize>,
    #[serde(default)]
    reference_frames: Vec<FrameId>,
}

/// Read-only pose data for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBank {
    talk_frames: Vec<FrameId>,
    talk_chunks: Vec<Vec<FrameId>>,
    silent_frame: FrameId,
    open_mouth_frame: FrameId,
    reference_frames: Vec<FrameId>,
}

impl FrameBank {
    /// Creates a bank from explicit chunks.
    ///
    /// # Errors
    /// `EmptyChunkPool` when `talk_chunks` is empty, `EmptyChunk` when any
    /// chunk has no frames.
    pub fn new(
        talk_frames: Vec<FrameId>,
        talk_chunks: Vec<Vec<FrameId>>,
        silent_frame: FrameId,
        open_mouth_frame: FrameId,
    ) -> Result<Self> {
        let bank = Self {
            talk_frames,
            talk_chunks,
            silent_frame,
            open_mouth_frame,
            reference_frames: Vec::new(),
        };
        bank.validate()?;
        Ok(bank)
    }

    /// Creates a bank whose chunks are consecutive `chunk_len` slices of
    /// `talk_frames`. The final chunk may be shorter.
    pub fn from_talk_frames(
        talk_frames: Vec<FrameId>,
        chunk_len: usize,
        silent_frame: FrameId,
        open_mouth_frame: FrameId,
    ) -> Result<Self> {
        if chunk_len == 0 {
            return Err(MouthtrackError::FrameBankParse {
                message: "chunk_len must be positive".to_string(),
            });
        }
        let talk_chunks = talk_frames.chunks(chunk_len).map(<[_]>::to_vec).collect();
        Self::new(talk_frames, talk_chunks, silent_frame, open_mouth_frame)
    }

    /// Attaches the reference animation used for the expected-frame summary.
    pub fn with_reference_frames(mut self, reference_frames: Vec<FrameId>) -> Self {
        self.reference_frames = reference_frames;
        self
    }

    /// Load a bank from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MouthtrackError::FrameBankNotFound {
                    path: path.display().to_string(),
                }
            } else {
                MouthtrackError::Io(e)
            }
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse a bank from TOML text.
    ///
    /// `talk_chunks` wins when present; otherwise chunks are cut from
    /// `talk_frames` every `chunk_len` frames.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: FrameBankFile =
            toml::from_str(contents).map_err(|e| MouthtrackError::FrameBankParse {
                message: e.to_string(),
            })?;

        let bank = match file.talk_chunks {
            Some(chunks) => Self::new(
                file.talk_frames,
                chunks,
                file.silent_frame,
                file.open_mouth_frame,
            )?,
            None => Self::from_talk_frames(
                file.talk_frames,
                file.chunk_len.unwrap_or(defaults::TALK_CHUNK_LEN),
                file.silent_frame,
                file.open_mouth_frame,
            )?,
        };
        Ok(bank.with_reference_frames(file.reference_frames))
    }

    /// Checks the chunk pool is usable for rotation.
    pub fn validate(&self) -> Result<()> {
        if self.talk_chunks.is_empty() {
            return Err(MouthtrackError::EmptyChunkPool);
        }
        if let Some(index) = self.talk_chunks.iter().position(Vec::is_empty) {
            return Err(MouthtrackError::EmptyChunk { index });
        }
        Ok(())
    }

    pub fn talk_frames(&self) -> &[FrameId] {
        &self.talk_frames
    }

    pub fn talk_chunks(&self) -> &[Vec<FrameId>] {
        &self.talk_chunks
    }

    pub fn silent_frame(&self) -> &FrameId {
        &self.silent_frame
    }

    pub fn open_mouth_frame(&self) -> &FrameId {
        &self.open_mouth_frame
    }

    pub fn reference_frames(&self) -> &[FrameId] {
        &self.reference_frames
    }
}

impl Default for FrameBank {
    /// A small numbered bank: pose 0 is the closed mouth, 1 the wide-open
    /// mouth, 1..=8 the talk poses.
    fn default() -> Self {
        let ids = |raw: &[u32]| raw.iter().copied().map(FrameId::Index).collect::<Vec<_>>();
        Self {
            talk_frames: ids(&[1, 2, 3, 4, 5, 6, 7, 8]),
            talk_chunks: vec![
                ids(&[2, 4, 1, 3, 5, 3]),
                ids(&[3, 6, 8, 4, 2, 5, 1]),
                ids(&[5, 7, 3, 1, 4, 6]),
                ids(&[8, 2, 6, 3, 7, 4, 1, 5]),
            ],
            silent_frame: FrameId::Index(0),
            open_mouth_frame: FrameId::Index(1),
            reference_frames: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn idx(raw: &[u32]) -> Vec<FrameId> {
        raw.iter().copied().map(FrameId::Index).collect()
    }

    #[test]
    fn frame_id_display_is_verbatim() {
        assert_eq!(FrameId::Index(17).to_string(), "17");
        assert_eq!(FrameId::from("mouth_wide").to_string(), "mouth_wide");
    }

    #[test]
    fn default_bank_is_valid() {
        let bank = FrameBank::default();
        assert!(bank.validate().is_ok());
        assert_eq!(bank.silent_frame(), &FrameId::Index(0));
        assert_eq!(bank.talk_chunks().len(), 4);
    }

    #[test]
    fn new_rejects_empty_pool() {
        let result = FrameBank::new(idx(&[1, 2]), Vec::new(), FrameId::Index(0), FrameId::Index(1));
        assert!(matches!(result, Err(MouthtrackError::EmptyChunkPool)));
    }

    #[test]
    fn new_rejects_empty_chunk() {
        let result = FrameBank::new(
            idx(&[1, 2]),
            vec![idx(&[1]), Vec::new()],
            FrameId::Index(0),
            FrameId::Index(1),
        );
        assert!(matches!(result, Err(MouthtrackError::EmptyChunk { index: 1 })));
    }

    #[test]
    fn from_talk_frames_cuts_fixed_chunks() {
        let bank = FrameBank::from_talk_frames(
            idx(&[1, 2, 3, 4, 5]),
            2,
            FrameId::Index(0),
            FrameId::Index(9),
        )
        .unwrap();
        assert_eq!(
            bank.talk_chunks(),
            &[idx(&[1, 2]), idx(&[3, 4]), idx(&[5])]
        );
    }

    #[test]
    fn from_talk_frames_without_frames_has_empty_pool() {
        let result =
            FrameBank::from_talk_frames(Vec::new(), 4, FrameId::Index(0), FrameId::Index(1));
        assert!(matches!(result, Err(MouthtrackError::EmptyChunkPool)));
    }

    #[test]
    fn from_talk_frames_rejects_zero_chunk_len() {
        let result =
            FrameBank::from_talk_frames(idx(&[1]), 0, FrameId::Index(0), FrameId::Index(1));
        assert!(matches!(result, Err(MouthtrackError::FrameBankParse { .. })));
    }

    #[test]
    fn parses_explicit_chunks_and_names() {
        let bank = FrameBank::from_toml_str(
            r#"
            silent_frame = "rest"
            open_mouth_frame = "aa"
            talk_frames = ["aa", "oh", "ee"]
            talk_chunks = [["aa", "oh"], ["ee", 4]]
            reference_frames = [0, 0, 1]
        "#,
        )
        .unwrap();

        assert_eq!(bank.silent_frame(), &FrameId::from("rest"));
        assert_eq!(bank.talk_chunks()[1], vec![FrameId::from("ee"), FrameId::Index(4)]);
        assert_eq!(bank.reference_frames().len(), 3);
    }

    #[test]
    fn parses_talk_frames_with_chunk_len() {
        let bank = FrameBank::from_toml_str(
            r#"
            silent_frame = 0
            open_mouth_frame = 1
            talk_frames = [1, 2, 3, 4, 5, 6]
            chunk_len = 3
        "#,
        )
        .unwrap();
        assert_eq!(bank.talk_chunks(), &[idx(&[1, 2, 3]), idx(&[4, 5, 6])]);
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = FrameBank::from_toml_str(
            r#"
            silent_frame = 0
            open_mouth_frame = 1
            talk_frames = [1]
            talk_frame = [2]
        "#,
        );
        assert!(matches!(result, Err(MouthtrackError::FrameBankParse { .. })));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let result = FrameBank::load(Path::new("/tmp/nonexistent_mouthtrack_bank_987.toml"));
        match result {
            Err(MouthtrackError::FrameBankNotFound { path }) => {
                assert!(path.contains("nonexistent_mouthtrack_bank_987"));
            }
            other => panic!("Expected FrameBankNotFound, got {:?}", other),
        }
    }

    #[test]
    fn load_reads_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"silent_frame = 0\nopen_mouth_frame = 1\ntalk_chunks = [[1, 2]]\n")
            .unwrap();
        let bank = FrameBank::load(temp_file.path()).unwrap();
        assert_eq!(bank.talk_chunks(), &[idx(&[1, 2])]);
    }
}
