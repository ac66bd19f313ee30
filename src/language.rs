use serde::{Deserialize, Serialize};

/// Languages the sentiment pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Tr,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }
}

const TURKISH_CHARS: [char; 12] = [
    'ç', 'ğ', 'ı', 'ö', 'ş', 'ü', 'Ç', 'Ğ', 'İ', 'Ö', 'Ş', 'Ü',
];

/// Classify a text as Turkish or English.
///
/// Turkish wins as soon as any Turkish-specific diacritic appears anywhere in
/// the text; everything else is treated as English. O(len), never fails.
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(|c| TURKISH_CHARS.contains(&c)) {
        Language::Tr
    } else {
        Language::En
    }
}
