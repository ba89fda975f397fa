//! Target languages offered for translation and voiceover.

use std::fmt;

use serde::Serialize;

/// A translation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    /// Short code (BCP 47 style), used on the command line.
    pub code: &'static str,
    /// English display name, sent to the translation model and used in file names.
    pub name: &'static str,
}

/// Languages offered as translation targets.
pub const LANGUAGES: &[Language] = &[
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "pt-BR", name: "Brazilian Portuguese" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "sv", name: "Swedish" },
    Language { code: "pl", name: "Polish" },
    Language { code: "ru", name: "Russian" },
    Language { code: "uk", name: "Ukrainian" },
    Language { code: "el", name: "Greek" },
    Language { code: "tr", name: "Turkish" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "he", name: "Hebrew" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh", name: "Mandarin Chinese" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "th", name: "Thai" },
    Language { code: "id", name: "Indonesian" },
    Language { code: "sw", name: "Swahili" },
    Language { code: "ht", name: "Haitian Creole" },
];

impl Language {
    /// Finds a language by code or name, ignoring case and surrounding whitespace.
    pub fn find(query: &str) -> Option<Language> {
        let query = query.trim();
        LANGUAGES
            .iter()
            .find(|lang| {
                lang.code.eq_ignore_ascii_case(query) || lang.name.eq_ignore_ascii_case(query)
            })
            .copied()
    }

    /// Download name for this language's voiceover.
    pub fn voiceover_file_name(&self) -> String {
        voiceover_file_name(self.name)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Builds `<LanguageName>_voiceover.wav`, with each whitespace run in the
/// name replaced by a single underscore.
pub fn voiceover_file_name(language_name: &str) -> String {
    let mut stem = String::with_capacity(language_name.len());
    let mut in_space = false;
    for ch in language_name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(ch);
            in_space = false;
        }
    }
    format!("{stem}_voiceover.wav")
}
