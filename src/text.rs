//! Text cleaning and tokenization helpers.
//!
//! Everything here is pure string processing: normalization for the sentiment
//! and theme pipeline, the bilingual stopword tables, diacritic folding for
//! token checks, and the lightweight sentence splitter.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").unwrap());
// Keep word characters, whitespace and the emoji range; everything else
// becomes a space.
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s\u{263A}-\u{1F645}]").unwrap());
// Digit runs of 5+ are ids/timestamps, not content. Short numbers (times,
// scores) survive.
static LONG_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{5,}\b").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+|\n+").unwrap());

const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "wasn", "weren",
    "won", "wouldn", "shouldn", "mustn", "mightn", "needn",
];

const TURKISH_STOP_WORDS: &[&str] = &[
    "acaba", "ama", "aslında", "az", "bazı", "belki", "biri", "birkaç", "birşey", "biz",
    "bu", "çok", "çünkü", "da", "daha", "de", "defa", "diye", "eğer", "en", "gibi", "hem",
    "hep", "hepsi", "her", "hiç", "için", "ile", "ise", "kez", "ki", "kim", "mı", "mu",
    "mü", "nasıl", "ne", "neden", "nerde", "nerede", "nereye", "niçin", "niye", "o",
    "sanki", "şey", "siz", "şu", "tüm", "ve", "veya", "ya", "yani",
];

// Platform filler words that drown out real signal in the word cloud.
const DOMAIN_STOP_WORDS: &[&str] = &[
    "video", "güzel", "iyi", "kötü", "var", "yok", "bir", "olan", "olur", "kadar", "hangi",
    "youtube", "like", "subscribe", "comment", "bence", "gerçekten", "kesinlikle",
    "muhtemelen", "zaten", "artık", "sadece", "bile", "öyle", "böyle", "şöyle",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ENGLISH_STOP_WORDS
        .iter()
        .chain(TURKISH_STOP_WORDS.iter())
        .copied()
        .collect()
});

static EXTENDED_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    STOP_WORDS
        .iter()
        .copied()
        .chain(DOMAIN_STOP_WORDS.iter().copied())
        .collect()
});

/// Clean raw comment text for downstream scoring.
///
/// Lowercases, strips URLs and email-like tokens, keeps emoji while dropping
/// other punctuation, removes long digit runs, collapses whitespace and drops
/// bilingual stopwords. Empty input yields an empty string.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.to_lowercase();
    let text = URL_RE.replace_all(&text, "");
    let text = EMAIL_RE.replace_all(&text, "");
    let text = NON_WORD_RE.replace_all(&text, " ");
    let text = LONG_DIGIT_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    text.trim()
        .split(' ')
        .filter(|word| !word.is_empty() && !STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_stopword(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Stopword check including the domain filler list (word-cloud use).
pub fn is_extended_stopword(word: &str) -> bool {
    EXTENDED_STOP_WORDS.contains(word)
}

/// Fold Turkish diacritics to their ASCII neighbours.
pub fn fold_diacritics(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'ş' => 's',
            'ğ' => 'g',
            'ü' => 'u',
            'ç' => 'c',
            'ö' => 'o',
            'ı' => 'i',
            other => other,
        })
        .collect()
}

/// True when the token is purely alphabetic after diacritic folding.
pub fn is_alphabetic_token(word: &str) -> bool {
    let folded = fold_diacritics(word);
    !folded.is_empty() && folded.chars().all(|c| c.is_alphabetic())
}

/// Split text into sentences on terminal punctuation and newlines.
///
/// May return an empty vec (e.g. for whitespace-only input); callers fall
/// back to treating the whole text as one sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BOUNDARY_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_clean_text_strips_urls_and_emails() {
        let cleaned = clean_text("watch https://example.com/watch?v=abc123 mail me someone@example.com thanks");
        assert!(!cleaned.contains("example"));
        assert!(!cleaned.contains('@'));
        assert!(cleaned.contains("watch"));
        assert!(cleaned.contains("thanks"));
    }

    #[test]
    fn test_clean_text_lowercases_and_drops_stopwords() {
        assert_eq!(clean_text("This IS a GREAT Tutorial"), "great tutorial");
    }

    #[test]
    fn test_clean_text_drops_long_digit_runs_keeps_short() {
        let cleaned = clean_text("timestamp 12345678 at 12 45");
        assert!(!cleaned.contains("12345678"));
        assert!(cleaned.contains("12"));
        assert!(cleaned.contains("45"));
    }

    #[test]
    fn test_clean_text_preserves_emoji() {
        let cleaned = clean_text("amazing 😀 content!!!");
        assert!(cleaned.contains('😀'));
        assert!(!cleaned.contains('!'));
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("great    tutorial\n\n  really   helpful"), "great tutorial really helpful");
    }

    #[test]
    fn test_fold_diacritics() {
        assert_eq!(fold_diacritics("öğretici"), "ogretici");
        assert_eq!(fold_diacritics("çalışma"), "calisma");
    }

    #[test]
    fn test_is_alphabetic_token() {
        assert!(is_alphabetic_token("öğretici"));
        assert!(is_alphabetic_token("tutorial"));
        assert!(!is_alphabetic_token("abc123"));
        assert!(!is_alphabetic_token(""));
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Great video. Really helpful! Will you make more?");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "Great video");
        assert_eq!(sentences[2], "Will you make more?");
    }

    #[test]
    fn test_split_sentences_empty_input() {
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_split_sentences_newlines() {
        let sentences = split_sentences("first line\nsecond line");
        assert_eq!(sentences, vec!["first line", "second line"]);
    }
}
