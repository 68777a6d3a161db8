//! Integration tests for subgen
//!
//! These tests validate the integration between components without requiring
//! FFmpeg, the whisper CLI, or a running translation endpoint.

use subgen::config::Config;
use subgen::lang;
use subgen::pipeline::subtitle_paths;
use subgen::subtitle::{compose, convert_to_subtitles, SubtitleEntry};
use subgen::transcribe::TranscriptSegment;

use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Integration Tests
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();
        assert_eq!(config.whisper.binary, "whisper");
        assert_eq!(config.whisper.model, "medium");
        assert_eq!(config.translator.timeout_secs, 120);
    }

    #[test]
    fn test_config_default_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_endpoint() {
        let mut config = Config::default();
        config.translator.endpoint = String::new();
        assert!(config.validate().is_err());
    }
}

// ============================================================================
// Language Table Tests
// ============================================================================

mod lang_tests {
    use super::*;

    #[test]
    fn test_all_five_languages_present() {
        for code in ["it", "en", "fr", "es", "de"] {
            assert!(lang::find(code).is_some(), "missing language {code}");
        }
    }

    #[test]
    fn test_iso3_mapping() {
        assert_eq!(lang::find("it").unwrap().iso3, "ita");
        assert_eq!(lang::find("en").unwrap().iso3, "eng");
        assert_eq!(lang::find("fr").unwrap().iso3, "fra");
        assert_eq!(lang::find("es").unwrap().iso3, "spa");
        assert_eq!(lang::find("de").unwrap().iso3, "deu");
    }
}

// ============================================================================
// Subtitle Composition Tests
// ============================================================================

mod subtitle_tests {
    use super::*;

    fn sample_entries() -> Vec<SubtitleEntry> {
        vec![
            SubtitleEntry {
                index: 1,
                start: Duration::from_millis(1500),
                end: Duration::from_millis(4000),
                text: "Hello, welcome to this video.".to_string(),
            },
            SubtitleEntry {
                index: 2,
                start: Duration::from_millis(4500),
                end: Duration::from_millis(7000),
                text: "Today we're going to learn.".to_string(),
            },
        ]
    }

    #[test]
    fn test_srt_composition() {
        let output = compose(&sample_entries());

        assert!(output.contains("1\n00:00:01,500 --> 00:00:04,000"));
        assert!(output.contains("Hello, welcome to this video."));
        assert!(output.contains("2\n00:00:04,500 --> 00:00:07,000"));
    }

    #[test]
    fn test_records_are_blank_line_separated() {
        let output = compose(&sample_entries());
        assert!(output.contains("Hello, welcome to this video.\n\n2"));
    }

    #[test]
    fn test_multiline_subtitle_text() {
        let entries = vec![SubtitleEntry {
            index: 1,
            start: Duration::from_secs(0),
            end: Duration::from_secs(5),
            text: "This is line one.\nThis is line two.".to_string(),
        }];

        let output = compose(&entries);

        assert!(output.contains("This is line one.\nThis is line two."));
    }
}

// ============================================================================
// Transcript to Subtitle Conversion Tests
// ============================================================================

mod conversion_tests {
    use super::*;

    fn segment(start_ms: u64, end_ms: u64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start: Duration::from_millis(start_ms),
            end: Duration::from_millis(end_ms),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_indices_monotonic_from_one() {
        let segments = vec![
            segment(0, 1000, "uno"),
            segment(1500, 2500, "due"),
            segment(3000, 4000, "tre"),
        ];

        let entries = convert_to_subtitles(segments);

        let indices: Vec<usize> = entries.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_overlapping_ranges_in_output() {
        let segments = vec![
            segment(0, 3000, "overlaps"),
            segment(2000, 4000, "the previous"),
            segment(3500, 5000, "and this one too"),
        ];

        let entries = convert_to_subtitles(segments);

        for pair in entries.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_segments_to_srt_end_to_end() {
        let segments = vec![
            segment(0, 2400, " Ciao mondo. "),
            segment(2900, 4000, " Come stai? "),
        ];

        let output = compose(&convert_to_subtitles(segments));

        assert!(output.starts_with("1\n00:00:00,000 --> 00:00:02,400\nCiao mondo.\n"));
        assert!(output.contains("2\n00:00:02,900 --> 00:00:04,000\nCome stai?\n"));
    }
}

// ============================================================================
// Output Naming Tests
// ============================================================================

mod naming_tests {
    use super::*;

    #[test]
    fn test_dual_subtitle_naming() {
        let target = lang::find("es").unwrap();
        let (short, long) = subtitle_paths(Path::new("/media/show/episode 1.mp4"), target);

        assert_eq!(short, PathBuf::from("/media/show/episode 1.es.srt"));
        assert_eq!(long, PathBuf::from("/media/show/episode 1.spa.srt"));
    }

    #[test]
    fn test_outputs_land_next_to_video() {
        let target = lang::find("fr").unwrap();
        let (short, long) = subtitle_paths(Path::new("/videos/clip.webm"), target);

        assert_eq!(short.parent(), Some(Path::new("/videos")));
        assert_eq!(long.parent(), Some(Path::new("/videos")));
    }
}
