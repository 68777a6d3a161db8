use super::SubtitleEntry;
use crate::transcribe::TranscriptSegment;

/// Convert transcript segments to numbered subtitle entries.
///
/// Indices start at 1 and increase monotonically; overlapping time ranges
/// are clamped so no caption starts before the previous one ends.
pub fn convert_to_subtitles(segments: Vec<TranscriptSegment>) -> Vec<SubtitleEntry> {
    let entries: Vec<SubtitleEntry> = segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| SubtitleEntry {
            index: i + 1,
            start: segment.start,
            end: segment.end,
            text: segment.text.trim().to_string(),
        })
        .filter(|e| !e.text.is_empty())
        .collect();

    renumber_entries(fix_overlapping_timestamps(entries))
}

/// Fix overlapping timestamps by adjusting end times.
fn fix_overlapping_timestamps(entries: Vec<SubtitleEntry>) -> Vec<SubtitleEntry> {
    if entries.is_empty() {
        return entries;
    }

    let mut result: Vec<SubtitleEntry> = Vec::new();

    for entry in entries {
        if let Some(last) = result.last_mut() {
            // If current entry starts before previous ends, adjust previous end
            if entry.start < last.end {
                last.end = entry.start;
            }
        }
        result.push(entry);
    }

    result
}

/// Re-number entries sequentially starting from 1.
fn renumber_entries(entries: Vec<SubtitleEntry>) -> Vec<SubtitleEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, mut entry)| {
            entry.index = i + 1;
            entry
        })
        .collect()
}
