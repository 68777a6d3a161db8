pub mod extract;

pub use extract::{
    check_ffmpeg, check_ffprobe, extract_audio, get_audio_duration,
};

use std::time::Duration;

/// Metadata about an extracted audio file.
#[derive(Debug, Clone)]
pub struct AudioMetadata {
    pub duration: Duration,
    pub sample_rate: u32,
    pub channels: u16,
}
