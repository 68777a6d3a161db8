use crate::audio::extract_audio;
use crate::error::{Result, SubgenError};
use crate::lang::Language;
use crate::subtitle::{compose, convert_to_subtitles, SubtitleEntry};
use crate::transcribe::Transcriber;
use crate::translate::{translate_segments, Translator};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tracing::{debug, info};

/// Configuration for the per-video subtitle pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source language of the audio track.
    pub source: &'static Language,
    /// Target language of the written subtitles.
    pub target: &'static Language,
    /// Show progress indicators.
    pub show_progress: bool,
}

/// Timings collected while processing one video.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub total_time: Duration,
    pub extraction_time: Duration,
    pub transcription_time: Duration,
    pub translation_time: Duration,
    pub audio_duration: Duration,
    pub subtitle_entries: usize,
}

/// Result of processing one video.
#[derive(Debug)]
pub struct PipelineResult {
    /// The processed video.
    pub video: PathBuf,
    /// The subtitle files written next to the video.
    pub outputs: Vec<PathBuf>,
    /// Generated subtitle entries.
    pub entries: Vec<SubtitleEntry>,
    /// Pipeline timings.
    pub stats: PipelineStats,
}

/// Subtitle paths for a video: `<base>.<code>.srt` and `<base>.<iso3>.srt`.
///
/// Both carry the same content; players differ in which suffix they match.
pub fn subtitle_paths(video: &Path, target: &Language) -> (PathBuf, PathBuf) {
    let stem = video.file_stem().unwrap_or_default().to_string_lossy();
    let dir = video.parent().unwrap_or_else(|| Path::new("."));

    let short = dir.join(format!("{}.{}.srt", stem, target.code));
    let long = dir.join(format!("{}.{}.srt", stem, target.iso3));
    (short, long)
}

fn check_cancelled(cancelled: &Arc<AtomicBool>) -> Result<()> {
    if cancelled.load(Ordering::Relaxed) {
        return Err(SubgenError::Cancelled);
    }
    Ok(())
}

fn stage_spinner(show_progress: bool, message: &str) -> Option<ProgressBar> {
    if !show_progress {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Generate translated subtitles for one video.
///
/// Stages run sequentially: extract the audio track to a temp WAV,
/// transcribe it, translate every segment, compose SRT and write it under
/// both naming conventions. The temp directory is removed on every exit
/// path, including errors and cancellation.
pub async fn generate_subtitles(
    video: &Path,
    transcriber: &dyn Transcriber,
    translator: &dyn Translator,
    config: &PipelineConfig,
    cancelled: Arc<AtomicBool>,
) -> Result<PipelineResult> {
    let start_time = Instant::now();

    if !video.exists() {
        return Err(SubgenError::FileNotFound(video.display().to_string()));
    }

    let temp_dir = TempDir::new()?;
    debug!("Using temp directory: {:?}", temp_dir.path());

    check_cancelled(&cancelled)?;

    // Stage 1: audio extraction
    info!("Stage 1/4: Extracting audio from {:?}", video);
    let extraction_start = Instant::now();

    let extraction_pb = stage_spinner(config.show_progress, "Extracting audio...");

    let audio_path = temp_dir.path().join("audio.wav");
    let audio_metadata = extract_audio(video, &audio_path).await?;

    if let Some(pb) = extraction_pb {
        pb.finish_with_message(format!(
            "✓ Audio extracted ({:.1}s)",
            audio_metadata.duration.as_secs_f64()
        ));
    }
    let extraction_time = extraction_start.elapsed();

    check_cancelled(&cancelled)?;

    // Stage 2: transcription
    info!("Stage 2/4: Transcribing with {}", transcriber.name());
    let transcription_start = Instant::now();

    let transcription_pb = stage_spinner(config.show_progress, "Transcribing audio...");

    let transcript = transcriber.transcribe(&audio_path, config.source.code).await?;

    if let Some(pb) = transcription_pb {
        pb.finish_with_message(format!(
            "✓ Transcribed {} segments",
            transcript.segments.len()
        ));
    }
    let transcription_time = transcription_start.elapsed();

    info!(
        "Transcription complete: {} segments in {:.2}s",
        transcript.segments.len(),
        transcription_time.as_secs_f64()
    );

    check_cancelled(&cancelled)?;

    // Stage 3: translation
    info!(
        "Stage 3/4: Translating segments {} -> {}",
        config.source.code, config.target.code
    );
    let translation_start = Instant::now();

    let translated = translate_segments(
        translator,
        transcript.segments,
        config.source.code,
        config.target.code,
        config.show_progress,
        &cancelled,
    )
    .await?;

    let translation_time = translation_start.elapsed();

    check_cancelled(&cancelled)?;

    // Stage 4: subtitle assembly
    info!("Stage 4/4: Writing subtitles");

    let entries = convert_to_subtitles(translated);
    let content = compose(&entries);

    let (short_path, long_path) = subtitle_paths(video, config.target);
    fs::write(&short_path, &content)?;
    fs::write(&long_path, &content)?;

    info!(
        "Wrote {} entries to {:?} and {:?}",
        entries.len(),
        short_path,
        long_path
    );

    let stats = PipelineStats {
        total_time: start_time.elapsed(),
        extraction_time,
        transcription_time,
        translation_time,
        audio_duration: audio_metadata.duration,
        subtitle_entries: entries.len(),
    };

    Ok(PipelineResult {
        video: video.to_path_buf(),
        outputs: vec![short_path, long_path],
        entries,
        stats,
    })
}

/// Print a summary of the whole run.
pub fn print_summary(results: &[PipelineResult]) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                    Subtitle Generation Complete                ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Processed videos:");
    for result in results {
        println!(
            "    {} ({} entries, {:.1}s audio, {:.2}s total)",
            result.video.display(),
            result.stats.subtitle_entries,
            result.stats.audio_duration.as_secs_f64(),
            result.stats.total_time.as_secs_f64()
        );
    }
    println!();
    println!("  Generated subtitle files:");
    for result in results {
        for output in &result.outputs {
            println!("    {}", output.display());
        }
    }
    println!();
    println!("  Subtitles can be enabled in any media player.");
    println!("═══════════════════════════════════════════════════════════════");
}
