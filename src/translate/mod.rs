pub mod seamless;

pub use seamless::SeamlessTranslator;

use crate::error::{Result, SubgenError};
use crate::transcribe::TranscriptSegment;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one piece of text between the given ISO 639-1 codes.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// Translate every segment's text in place, sequentially.
///
/// Segments whose translation comes back empty keep their original text so
/// the subtitle timeline stays intact.
pub async fn translate_segments(
    translator: &dyn Translator,
    segments: Vec<TranscriptSegment>,
    source_lang: &str,
    target_lang: &str,
    show_progress: bool,
    cancelled: &Arc<AtomicBool>,
) -> Result<Vec<TranscriptSegment>> {
    if segments.is_empty() {
        return Ok(segments);
    }

    info!(
        "Translating {} segments {} -> {} using {}",
        segments.len(),
        source_lang,
        target_lang,
        translator.name()
    );

    let progress_bar = if show_progress {
        let pb = ProgressBar::new(segments.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} segments ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut translated = Vec::with_capacity(segments.len());

    for mut segment in segments {
        if cancelled.load(Ordering::Relaxed) {
            if let Some(pb) = &progress_bar {
                pb.abandon_with_message("Translation cancelled");
            }
            return Err(SubgenError::Cancelled);
        }

        let text = translator
            .translate(&segment.text, source_lang, target_lang)
            .await?;

        if !text.trim().is_empty() {
            segment.text = text.trim().to_string();
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }

        translated.push(segment);
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Translation complete");
    }

    Ok(translated)
}
