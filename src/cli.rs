//! Command-line interface for mouthtrack
//!
//! Provides argument parsing using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Config;
use crate::frames::format::FrameLayout;
use crate::timeline::TalkStyle;

/// Lip-sync frame tracks from voice recordings
#[derive(Parser, Debug)]
#[command(
    name = "mouthtrack",
    version,
    about = "Lip-sync frame tracks from voice recordings"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: pipeline stages, -vv: per-segment detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the frame track for a WAV recording
    Run(RunArgs),

    /// Print detected silence and speech spans
    Detect {
        /// WAV recording to analyse
        input: PathBuf,

        /// Print spans as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Options for `mouthtrack run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// WAV recording to process
    pub input: PathBuf,

    /// Frame bank TOML file (default: built-in bank)
    #[arg(long, value_name = "PATH")]
    pub bank: Option<PathBuf>,

    /// Output text file (default: out.txt)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Directory for exported speech clips (default: chunk)
    #[arg(long, value_name = "DIR")]
    pub chunk_dir: Option<PathBuf>,

    /// Skip exporting speech clips
    #[arg(long)]
    pub no_export: bool,

    /// Animation frame rate (default: 30)
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Where talk frames come from
    #[arg(long, value_enum, value_name = "STYLE")]
    pub talk_style: Option<TalkStyleArg>,

    /// Line-break layout of the output text
    #[arg(long, value_enum, value_name = "LAYOUT")]
    pub layout: Option<LayoutArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TalkStyleArg {
    Chunks,
    OpenMouth,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    PerSegment,
    Continuous,
}

impl From<TalkStyleArg> for TalkStyle {
    fn from(arg: TalkStyleArg) -> Self {
        match arg {
            TalkStyleArg::Chunks => TalkStyle::Chunks,
            TalkStyleArg::OpenMouth => TalkStyle::OpenMouth,
        }
    }
}

impl From<LayoutArg> for FrameLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::PerSegment => FrameLayout::PerSegment,
            LayoutArg::Continuous => FrameLayout::Continuous,
        }
    }
}

impl RunArgs {
    /// Apply command-line overrides on top of file/env configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(bank) = &self.bank {
            config.frames.bank = Some(bank.clone());
        }
        if let Some(out) = &self.out {
            config.output.out_path = out.clone();
        }
        if let Some(dir) = &self.chunk_dir {
            config.output.chunk_dir = dir.clone();
        }
        if self.no_export {
            config.output.export_chunks = false;
        }
        if let Some(fps) = self.fps {
            config.timing.fps = fps;
        }
        if let Some(style) = self.talk_style {
            config.frames.talk_style = style.into();
        }
        if let Some(layout) = self.layout {
            config.output.layout = layout.into();
        }
    }
}
