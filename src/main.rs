use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use subgen::audio::{check_ffmpeg, check_ffprobe};
use subgen::config::Config;
use subgen::interactive::{run_wizard, WizardDefaults};
use subgen::pipeline::{generate_subtitles, print_summary, PipelineConfig};
use subgen::transcribe::{check_whisper, WhisperCliTranscriber};
use subgen::translate::SeamlessTranslator;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "subgen")]
#[command(version, about = "Generate translated subtitles for video folders")]
#[command(
    long_about = "Extracts audio with FFmpeg, transcribes it with Whisper, translates the \
transcript with SeamlessM4T and writes .srt files next to the source videos. \
Prompts for anything not given on the command line."
)]
struct Cli {
    /// Folder containing the video files (prompted for if omitted)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Source language code (e.g. it, en, fr, es, de)
    #[arg(short, long)]
    source: Option<String>,

    /// Target language code (e.g. it, en, fr, es, de)
    #[arg(short, long)]
    target: Option<String>,

    /// Process every video in the folder without prompting for a selection
    #[arg(long)]
    all: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    // Fail before prompting if an external tool is missing
    check_ffmpeg()?;
    check_ffprobe()?;
    check_whisper(&config.whisper.binary)?;

    let wizard = run_wizard(WizardDefaults {
        dir: cli.dir,
        source: cli.source,
        target: cli.target,
        all: cli.all,
        assume_yes: cli.yes,
    })?;

    let cancelled = Arc::new(AtomicBool::new(false));
    let handler_flag = cancelled.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl+C handler")?;

    let transcriber = WhisperCliTranscriber::new(&config.whisper);
    let translator = SeamlessTranslator::new(&config.translator)?;

    let pipeline_config = PipelineConfig {
        source: wizard.source,
        target: wizard.target,
        show_progress: true,
    };

    info!(
        "Processing {} video(s): {} -> {}",
        wizard.videos.len(),
        wizard.source.label(),
        wizard.target.label()
    );

    let mut results = Vec::with_capacity(wizard.videos.len());

    for video in &wizard.videos {
        println!(
            "\nProcessing video: {}",
            video
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| video.display().to_string())
        );

        let result = generate_subtitles(
            video,
            &transcriber,
            &translator,
            &pipeline_config,
            cancelled.clone(),
        )
        .await
        .with_context(|| format!("Failed to process {}", video.display()))?;

        results.push(result);
    }

    print_summary(&results);

    Ok(())
}
