use crate::config::WhisperConfig;
use crate::error::{Result, SubgenError};
use crate::transcribe::{Transcriber, Transcript, TranscriptSegment};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;
use tracing::{debug, info};

/// Check if the whisper CLI is installed and accessible.
pub fn check_whisper(binary: &str) -> Result<()> {
    let output = Command::new(binary)
        .arg("--help")
        .output()
        .map_err(|e| {
            SubgenError::Transcription(format!(
                "Whisper CLI '{binary}' not found. Install it with: pip install openai-whisper. Error: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(SubgenError::Transcription(format!(
            "Whisper check failed for '{binary}'"
        )));
    }

    debug!("Whisper CLI is available");
    Ok(())
}

/// Transcriber that shells out to the whisper CLI with JSON output.
pub struct WhisperCliTranscriber {
    binary: String,
    model: String,
}

impl WhisperCliTranscriber {
    pub fn new(config: &WhisperConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            model: config.model.clone(),
        }
    }

    /// Read and convert the JSON transcript whisper wrote for `audio`.
    fn read_transcript(&self, output_dir: &Path, audio: &Path) -> Result<Transcript> {
        let stem = audio
            .file_stem()
            .ok_or_else(|| SubgenError::Transcription("Invalid audio file name".to_string()))?;
        let json_path = output_dir.join(format!("{}.json", stem.to_string_lossy()));

        let contents = std::fs::read_to_string(&json_path).map_err(|e| {
            SubgenError::Transcription(format!(
                "Failed to read whisper output {}: {e}",
                json_path.display()
            ))
        })?;

        let response: WhisperJsonOutput = serde_json::from_str(&contents)?;
        Ok(parse_response(response))
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(&self, audio: &Path, language: &str) -> Result<Transcript> {
        if !audio.exists() {
            return Err(SubgenError::FileNotFound(audio.display().to_string()));
        }

        let output_dir = TempDir::new()?;

        info!(
            "Transcribing {} with whisper model '{}'",
            audio.display(),
            self.model
        );

        let output = Command::new(&self.binary)
            .arg(audio)
            .args(["--model", &self.model])
            .args(["--output_format", "json"])
            .arg("--output_dir")
            .arg(output_dir.path())
            .args(["--language", language])
            .args(["--verbose", "False"])
            .output()
            .map_err(|e| {
                SubgenError::Transcription(format!("Failed to run '{}': {e}", self.binary))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SubgenError::Transcription(format!(
                "Whisper failed: {}",
                stderr.trim()
            )));
        }

        let transcript = self.read_transcript(output_dir.path(), audio)?;
        debug!("Whisper returned {} segments", transcript.segments.len());
        Ok(transcript)
    }

    fn name(&self) -> &'static str {
        "whisper-cli"
    }
}

/// Convert whisper's JSON output to our Transcript format.
fn parse_response(response: WhisperJsonOutput) -> Transcript {
    let segments = response
        .segments
        .into_iter()
        .map(|seg| TranscriptSegment {
            start: Duration::from_secs_f64(seg.start.max(0.0)),
            end: Duration::from_secs_f64(seg.end.max(0.0)),
            text: seg.text.trim().to_string(),
        })
        .filter(|seg| !seg.text.is_empty())
        .collect();

    Transcript {
        segments,
        language: response.language,
    }
}

// JSON output types (whisper --output_format json)

#[derive(Debug, Deserialize)]
struct WhisperJsonOutput {
    #[serde(default)]
    segments: Vec<WhisperJsonSegment>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WhisperJsonSegment {
    start: f64,
    end: f64,
    text: String,
}
