// SRT subtitle format
use super::SubtitleEntry;

/// Compose entries into SubRip syntax: numbered records with a
/// `HH:MM:SS,mmm --> HH:MM:SS,mmm` timecode line, the text block, and a
/// blank-line separator.
pub fn compose(entries: &[SubtitleEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\n{} --> {}\n{}\n",
                entry.index,
                format_timestamp(entry.start),
                format_timestamp(entry.end),
                entry.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_timestamp(d: std::time::Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = d.subsec_millis();
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}
