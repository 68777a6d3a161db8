pub mod whisper_cli;

pub use whisper_cli::{check_whisper, WhisperCliTranscriber};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// A single timed span of recognized speech.
#[derive(Debug, Clone)]
pub struct TranscriptSegment {
    pub start: Duration,
    pub end: Duration,
    pub text: String,
}

/// The full transcript of one audio file.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
    /// Language reported by the model, if any.
    pub language: Option<String>,
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file into timed segments.
    async fn transcribe(&self, audio: &Path, language: &str) -> Result<Transcript>;

    fn name(&self) -> &'static str;
}
