//! The language table offered by the wizard.
//!
//! Each entry carries the ISO 639-1 code used for prompting and the
//! translation model, plus the ISO 639-3 code used for the second output
//! file name (media players match three-letter suffixes more reliably).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code, e.g. "it".
    pub code: &'static str,
    /// ISO 639-3 code, e.g. "ita".
    pub iso3: &'static str,
    /// English display name.
    pub name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "it", iso3: "ita", name: "Italian" },
    Language { code: "en", iso3: "eng", name: "English" },
    Language { code: "fr", iso3: "fra", name: "French" },
    Language { code: "es", iso3: "spa", name: "Spanish" },
    Language { code: "de", iso3: "deu", name: "German" },
];

/// Look up a language by its ISO 639-1 code (case-insensitive).
pub fn find(code: &str) -> Option<&'static Language> {
    let lowered = code.trim().to_lowercase();
    LANGUAGES.iter().find(|l| l.code == lowered)
}

impl Language {
    /// "Italian (it)" — the form used in prompts and summaries.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}
