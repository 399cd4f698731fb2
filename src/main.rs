use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use mouthtrack::audio::AudioTrack;
use mouthtrack::cli::{Cli, Commands};
use mouthtrack::config::Config;
use mouthtrack::frames::FrameBank;
use mouthtrack::output::{render_detection, render_detection_json, render_report};
use mouthtrack::{logging, pipeline};
use std::io::IsTerminal;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);
    tracing::debug!(version = %mouthtrack::version_string(), "Starting");

    match cli.command {
        Commands::Run(args) => {
            let mut config = load_config(cli.config.as_deref())?;
            args.apply(&mut config);
            let bank = load_bank(&config)?;

            let report = pipeline::run(&config, &bank, &args.input)
                .with_context(|| format!("Failed to process {}", args.input.display()))?;

            if !cli.quiet {
                print!(
                    "{}",
                    render_report(&report, std::io::stdout().is_terminal())
                );
            }
        }
        Commands::Detect { input, json } => {
            let config = load_config(cli.config.as_deref())?;
            config.validate()?;
            let track = AudioTrack::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let detection = pipeline::detect(&track, &config);
            if json {
                println!("{}", render_detection_json(&detection)?);
            } else {
                print!(
                    "{}",
                    render_detection(&detection, std::io::stdout().is_terminal())
                );
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "mouthtrack",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/mouthtrack/config.toml)
/// 3. Built-in defaults
///
/// Environment overrides apply on top of whichever was loaded.
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path).with_context(|| format!("Failed to load {}", path.display()))?
    } else if let Some(default_path) = Config::default_path() {
        Config::load_or_default(&default_path)?
    } else {
        Config::default()
    };

    Ok(config.with_env_overrides())
}

fn load_bank(config: &Config) -> Result<FrameBank> {
    match &config.frames.bank {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading frame bank");
            Ok(FrameBank::load(path)?)
        }
        None => Ok(FrameBank::default()),
    }
}
