use mouthtrack::config::Config;
use mouthtrack::frames::{FrameBank, FrameLayout};
use mouthtrack::timeline::TalkStyle;
use mouthtrack::{MouthtrackError, pipeline};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SAMPLE_RATE: u32 = 8000;

/// Write a mono 16-bit WAV built from (loud, milliseconds) pieces.
fn write_wav(path: &Path, pieces: &[(bool, u32)]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    for &(loud, ms) in pieces {
        let value: i16 = if loud { 32_000 } else { 0 };
        for _ in 0..(ms * SAMPLE_RATE / 1000) {
            writer.write_sample(value).expect("Failed to write sample");
        }
    }
    writer.finalize().expect("Failed to finalize WAV");
}

fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.output.out_path = dir.path().join("out.txt");
    config.output.chunk_dir = dir.path().join("chunk");
    config
}

fn tokens(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn input(dir: &TempDir, pieces: &[(bool, u32)]) -> PathBuf {
    let path = dir.path().join("voice.wav");
    write_wav(&path, pieces);
    path
}

#[test]
fn leading_silence_then_speech_fills_sixty_frames() {
    let dir = TempDir::new().unwrap();
    let wav = input(&dir, &[(false, 700), (true, 1300)]);
    let config = config_in(&dir);

    let report = pipeline::run(&config, &FrameBank::default(), &wav).unwrap();

    assert_eq!(report.generated_frames, 60);
    assert_eq!(report.segments, 2);
    assert!((report.total_duration_seconds - 2.0).abs() < 1e-9);

    let text = std::fs::read_to_string(&config.output.out_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // 21 silence frames on one line, then 39 talk frames wrapped at 32.
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "0,".repeat(21));
    assert_eq!(lines[1].matches(',').count(), 32);
    assert_eq!(lines[2].matches(',').count(), 7);
    assert!(lines[1].starts_with("2,4,1,3,5,3,2,"));
    assert!(text.ends_with(",\n"));
}

#[test]
fn speech_clips_are_exported_as_wav() {
    let dir = TempDir::new().unwrap();
    let wav = input(&dir, &[(false, 700), (true, 1300)]);
    let config = config_in(&dir);

    let report = pipeline::run(&config, &FrameBank::default(), &wav).unwrap();

    assert_eq!(report.exported_clips, vec![config.output.chunk_dir.join("0.wav")]);
    let reader = hound::WavReader::open(&report.exported_clips[0]).unwrap();
    assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
    assert_eq!(reader.len(), 1300 * SAMPLE_RATE / 1000);
}

#[test]
fn no_export_leaves_chunk_dir_absent() {
    let dir = TempDir::new().unwrap();
    let wav = input(&dir, &[(false, 700), (true, 1300)]);
    let mut config = config_in(&dir);
    config.output.export_chunks = false;

    let report = pipeline::run(&config, &FrameBank::default(), &wav).unwrap();

    assert!(report.exported_clips.is_empty());
    assert!(!config.output.chunk_dir.exists());
    assert!(config.output.out_path.exists());
}

#[test]
fn talk_first_track_applies_bleed_between_segments() {
    let dir = TempDir::new().unwrap();
    let wav = input(&dir, &[(true, 1000), (false, 1000), (true, 1000)]);
    let config = config_in(&dir);

    let report = pipeline::run(&config, &FrameBank::default(), &wav).unwrap();
    assert_eq!(report.segments, 3);
    assert_eq!(report.generated_frames, 90);

    let text = std::fs::read_to_string(&config.output.out_path).unwrap();
    let all = tokens(&text);
    assert_eq!(all.len(), 90);

    // talk 1.0s + bleed, silence 1.0s - bleed, final talk untouched
    assert!(all[..45].iter().all(|t| t != "0"));
    assert!(all[45..60].iter().all(|t| t == "0"));
    assert!(all[60..].iter().all(|t| t != "0"));

    // the second talk segment draws the next chunk
    assert_eq!(all[0], "2");
    assert_eq!(all[60], "3");
    assert_eq!(report.exported_clips.len(), 2);
}

#[test]
fn named_bank_with_open_mouth_style_and_continuous_layout() {
    let dir = TempDir::new().unwrap();
    let wav = input(&dir, &[(false, 700), (true, 1300)]);
    let bank = FrameBank::from_toml_str(
        r#"
silent_frame = "rest"
open_mouth_frame = "open"
talk_frames = ["a", "e", "o"]
chunk_len = 2
reference_frames = [1, 2, 3]
"#,
    )
    .unwrap();
    let mut config = config_in(&dir);
    config.frames.talk_style = TalkStyle::OpenMouth;
    config.output.layout = FrameLayout::Continuous;

    let report = pipeline::run(&config, &bank, &wav).unwrap();
    assert_eq!(report.expected_frames, 3);

    let text = std::fs::read_to_string(&config.output.out_path).unwrap();
    let all = tokens(&text);
    assert_eq!(all.len(), 60);
    assert!(all[..21].iter().all(|t| t == "rest"));
    assert!(all[21..].iter().all(|t| t == "open"));

    // 60 values at 32 per line: one full line, then 28 without a newline
    assert_eq!(text.matches('\n').count(), 1);
    assert!(text.ends_with("open,"));
}

#[test]
fn out_path_parent_is_created() {
    let dir = TempDir::new().unwrap();
    let wav = input(&dir, &[(true, 500)]);
    let mut config = config_in(&dir);
    config.output.out_path = dir.path().join("nested").join("frames.txt");
    config.output.export_chunks = false;

    let report = pipeline::run(&config, &FrameBank::default(), &wav).unwrap();

    assert_eq!(report.generated_frames, 15);
    assert!(config.output.out_path.exists());
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let result = pipeline::run(&config, &FrameBank::default(), &dir.path().join("nope.wav"));

    assert!(result.is_err());
    assert!(!config.output.out_path.exists());
}

#[test]
fn invalid_config_is_rejected_before_decoding() {
    let dir = TempDir::new().unwrap();
    let wav = input(&dir, &[(true, 500)]);
    let mut config = config_in(&dir);
    config.timing.fps = 0;

    let result = pipeline::run(&config, &FrameBank::default(), &wav);

    assert!(matches!(
        result,
        Err(MouthtrackError::ConfigInvalidValue { .. })
    ));
}

#[test]
fn config_file_drives_frame_rate() {
    let dir = TempDir::new().unwrap();
    let wav = input(&dir, &[(false, 700), (true, 1300)]);
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "[timing]\nfps = 10\n").unwrap();

    let mut config = Config::load(&config_path).unwrap();
    config.output.out_path = dir.path().join("out.txt");
    config.output.export_chunks = false;

    let report = pipeline::run(&config, &FrameBank::default(), &wav).unwrap();

    // 0.7s * 10 = 7, 1.3s * 10 = 13
    assert_eq!(report.generated_frames, 20);
}
