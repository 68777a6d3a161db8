use crate::lang::{self, Language, LANGUAGES};
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::fs;
use std::path::{Path, PathBuf};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm"];

/// Answers supplied on the command line; the wizard only prompts for what
/// is missing.
#[derive(Debug, Default)]
pub struct WizardDefaults {
    pub dir: Option<PathBuf>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub all: bool,
    pub assume_yes: bool,
}

/// Everything the pipeline needs for a run.
#[derive(Debug)]
pub struct WizardResult {
    pub videos: Vec<PathBuf>,
    pub source: &'static Language,
    pub target: &'static Language,
}

pub fn run_wizard(defaults: WizardDefaults) -> anyhow::Result<WizardResult> {
    print_header();

    let folder = match defaults.dir {
        Some(dir) => validate_folder(&dir)?,
        None => prompt_folder()?,
    };

    let videos = scan_video_files(&folder)?;
    if videos.is_empty() {
        anyhow::bail!("No video files found in {}", folder.display());
    }

    let selected = if defaults.all {
        videos
    } else {
        select_videos(videos)?
    };

    let source = match defaults.source {
        Some(code) => resolve_language(&code)?,
        None => select_language("Select source language:", 0)?,
    };

    let target = match defaults.target {
        Some(code) => resolve_language(&code)?,
        None => select_language("Select target language:", 1)?,
    };

    print_run_summary(&selected, source, target);

    if !defaults.assume_yes
        && !Confirm::new()
            .with_prompt("Proceed with these settings?")
            .default(true)
            .interact()?
    {
        anyhow::bail!("Cancelled by user");
    }

    println!();

    Ok(WizardResult {
        videos: selected,
        source,
        target,
    })
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║          subgen - video subtitle generator        ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!();
}

/// Strip surrounding quotes that file managers add when a path is
/// drag-and-dropped into the terminal.
fn strip_quotes(input: &str) -> &str {
    input
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
}

fn validate_folder(path: &Path) -> anyhow::Result<PathBuf> {
    if !path.is_dir() {
        anyhow::bail!("Not a directory: {}", path.display());
    }
    Ok(path.to_path_buf())
}

fn prompt_folder() -> anyhow::Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("Enter the path to the folder with video files")
        .interact_text()?;

    validate_folder(Path::new(strip_quotes(&input)))
}

/// List video files (by extension) directly inside `dir`, sorted by name.
fn scan_video_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
                    files.push(path);
                }
            }
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn select_videos(videos: Vec<PathBuf>) -> anyhow::Result<Vec<PathBuf>> {
    let items: Vec<String> = videos
        .iter()
        .map(|f| {
            let name = f
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| f.display().to_string());
            let size = fs::metadata(f)
                .map(|m| format_size(m.len()))
                .unwrap_or_else(|_| "?".to_string());
            format!("{} ({})", name, size)
        })
        .collect();

    loop {
        let selection = MultiSelect::new()
            .with_prompt("Select the videos to process (space to toggle, enter to confirm)")
            .items(&items)
            .interact()?;

        if selection.is_empty() {
            println!("{} Select at least one video", style("!").yellow());
            continue;
        }

        return Ok(selection.into_iter().map(|i| videos[i].clone()).collect());
    }
}

fn resolve_language(code: &str) -> anyhow::Result<&'static Language> {
    lang::find(code).ok_or_else(|| {
        let known: Vec<&str> = LANGUAGES.iter().map(|l| l.code).collect();
        anyhow::anyhow!(
            "Unknown language code '{}'. Available: {}",
            code,
            known.join(", ")
        )
    })
}

fn select_language(prompt: &str, default: usize) -> anyhow::Result<&'static Language> {
    let items: Vec<String> = LANGUAGES.iter().map(|l| l.label()).collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;

    Ok(&LANGUAGES[selection])
}

fn print_run_summary(videos: &[PathBuf], source: &Language, target: &Language) {
    println!("\n{}", style("═══ Summary ═══").bold());
    println!("  Videos:");
    for video in videos {
        println!("    {}", style(video.display()).cyan());
    }
    println!("  Source:    {}", source.label());
    println!("  Target:    {}", target.label());
    println!(
        "  Output:    <video>.{}.srt and <video>.{}.srt",
        target.code, target.iso3
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"/tmp/videos\""), "/tmp/videos");
        assert_eq!(strip_quotes("'/tmp/videos'"), "/tmp/videos");
        assert_eq!(strip_quotes("  /tmp/videos  "), "/tmp/videos");
        assert_eq!(strip_quotes("\" /tmp/My Videos \""), "/tmp/My Videos");
        assert_eq!(strip_quotes("plain"), "plain");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_scan_video_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.mp4"), b"x").unwrap();
        fs::write(dir.path().join("a.MKV"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub.mp4")).unwrap();

        let files = scan_video_files(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.MKV", "b.mp4"]);
    }

    #[test]
    fn test_validate_folder_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("video.mp4");
        fs::write(&file, b"x").unwrap();

        assert!(validate_folder(&file).is_err());
        assert!(validate_folder(dir.path()).is_ok());
    }

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language("it").unwrap().name, "Italian");
        assert!(resolve_language("xx").is_err());
    }
}
