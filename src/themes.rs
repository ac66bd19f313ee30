//! Theme taxonomy and hybrid keyword + zero-shot scoring.
//!
//! Each theme carries a bilingual keyword list. Keyword matching runs against
//! the raw lowercased text so stopword removal cannot defeat it; the
//! zero-shot capability is consulted only for keyword-plausible candidates.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use tracing::warn;

use crate::ml::ThemeBackend;
use crate::sentiment::{round4, ThemeScoreMap};

// Longer keywords weigh more; a score of 5 raw points saturates at 1.0.
const KEYWORD_LENGTH_DIVISOR: f64 = 10.0;
const KEYWORD_SCORE_SCALE: f64 = 5.0;
// Themes above this keyword score become zero-shot candidates.
const CANDIDATE_THRESHOLD: f64 = 0.1;
const BLEND_KEYWORD_WEIGHT: f64 = 0.6;
const BLEND_ML_WEIGHT: f64 = 0.4;
// Blended scores below this are dropped from the result.
const RETAIN_THRESHOLD: f64 = 0.05;
// Fallback keyword-only scores are floored here so they survive filtering.
const FALLBACK_FLOOR: f64 = 0.1;
const FALLBACK_TOP_N: usize = 3;
// Zero-shot is skipped for very short cleaned texts.
const MIN_CHARS_FOR_ZERO_SHOT: usize = 10;

/// Fixed theme taxonomy with bilingual keyword lists.
pub static THEME_KEYWORDS: Lazy<Vec<(&'static str, &'static [&'static str])>> = Lazy::new(|| {
    vec![
        (
            "content quality",
            &["kalite", "güzel", "harika", "mükemmel", "kötü", "berbat", "quality", "great", "awesome", "terrible", "bad"],
        ),
        (
            "presentation style",
            &["sunum", "anlatım", "stil", "presentation", "style", "delivery", "speaking"],
        ),
        (
            "video editing",
            &["montaj", "düzen", "editing", "layout", "structure", "organization"],
        ),
        (
            "audio and visuals",
            &["ses", "görüntü", "audio", "sound", "visual", "mikrofon", "microphone"],
        ),
        (
            "topic choice",
            &["konu", "topic", "subject", "theme", "idea"],
        ),
        (
            "interaction",
            &["etkileşim", "soru", "cevap", "interaction", "question", "answer", "response"],
        ),
        (
            "teaching",
            &["öğren", "öğret", "ders", "learn", "teach", "tutorial", "lesson", "education"],
        ),
        (
            "entertainment",
            &["eğlen", "komik", "gül", "fun", "funny", "entertaining", "laugh", "humor"],
        ),
        (
            "timeliness",
            &["güncel", "yeni", "fresh", "new", "current", "update", "recent"],
        ),
        (
            "community",
            &["abone", "takip", "community", "subscriber", "follower", "fan"],
        ),
        (
            "technical issues",
            &["sorun", "hata", "bug", "problem", "issue", "error", "glitch"],
        ),
        (
            "creativity",
            &["yaratıcı", "kreatif", "creative", "innovative"],
        ),
        (
            "originality",
            &["özgün", "farklı", "unique", "different", "original", "special"],
        ),
        (
            "sincerity",
            &["samimi", "doğal", "genuine", "authentic", "natural", "sincere"],
        ),
        (
            "professionalism",
            &["profesyonel", "kaliteli", "professional", "polished", "refined"],
        ),
        (
            "usefulness",
            &["faydalı", "yararlı", "useful", "helpful", "beneficial", "valuable"],
        ),
        (
            "motivation",
            &["motive", "ilham", "motivation", "inspiration", "encouraging"],
        ),
        (
            "comedy",
            &["espri", "comedy", "joke", "hilarious"],
        ),
        (
            "informativeness",
            &["bilgi", "info", "information", "educational", "informative"],
        ),
        (
            "reliability",
            &["güvenilir", "doğru", "reliable", "trustworthy", "accurate", "credible"],
        ),
    ]
});

/// Full taxonomy map with every score at zero.
pub fn zeroed_taxonomy() -> ThemeScoreMap {
    THEME_KEYWORDS
        .iter()
        .map(|(theme, _)| ((*theme).to_owned(), 0.0))
        .collect()
}

fn count_occurrences(text: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    text.matches(needle).count()
}

/// Score every theme in the taxonomy against the raw (uncleaned) text.
///
/// Each keyword contributes `occurrences * len/10`; the sum is scaled by 5
/// and capped at 1.0. Longer keywords carry more specificity than short ones.
pub fn keyword_theme_scores(raw_text: &str) -> ThemeScoreMap {
    let text = raw_text.to_lowercase();
    let mut scores = ThemeScoreMap::new();

    for (theme, keywords) in THEME_KEYWORDS.iter() {
        let mut score = 0.0;
        let mut hits = 0usize;
        for keyword in keywords.iter().copied() {
            let count = count_occurrences(&text, keyword);
            if count > 0 {
                score += count as f64 * keyword.chars().count() as f64 / KEYWORD_LENGTH_DIVISOR;
                hits += count;
            }
        }
        let normalized = if hits > 0 {
            (score / KEYWORD_SCORE_SCALE).min(1.0)
        } else {
            0.0
        };
        scores.insert((*theme).to_owned(), normalized);
    }

    scores
}

/// Hybrid theme classification: keyword scores blended with the zero-shot
/// capability, restricted to keyword-plausible candidate labels.
///
/// Zero-shot failure is never fatal; the keyword path carries the result.
/// The returned map is sparse but guaranteed non-empty for text with any
/// keyword signal; text without signal gets the zeroed taxonomy.
pub async fn classify_themes(
    backend: Option<&dyn ThemeBackend>,
    raw_text: &str,
    cleaned_text: &str,
) -> ThemeScoreMap {
    if raw_text.trim().is_empty() {
        return zeroed_taxonomy();
    }

    let keyword_scores = keyword_theme_scores(raw_text);

    // Candidates in taxonomy order, so the backend sees a stable label list.
    let candidates: Vec<String> = THEME_KEYWORDS
        .iter()
        .filter(|(theme, _)| keyword_scores.get(*theme).copied().unwrap_or(0.0) > CANDIDATE_THRESHOLD)
        .map(|(theme, _)| (*theme).to_owned())
        .collect();

    let mut ml_scores = ThemeScoreMap::new();
    if !candidates.is_empty() && cleaned_text.chars().count() > MIN_CHARS_FOR_ZERO_SHOT {
        if let Some(backend) = backend {
            match backend.zero_shot(cleaned_text, &candidates).await {
                Ok(prediction) => {
                    ml_scores = prediction
                        .labels
                        .into_iter()
                        .zip(prediction.scores)
                        .collect();
                }
                Err(err) => {
                    warn!("zero-shot theme scoring failed, using keyword scores only: {err}");
                }
            }
        }
    }

    let mut filtered = ThemeScoreMap::new();
    for (theme, _) in THEME_KEYWORDS.iter() {
        let keyword_score = keyword_scores.get(*theme).copied().unwrap_or(0.0);
        let ml_score = ml_scores.get(*theme).copied().unwrap_or(0.0);
        if keyword_score <= 0.0 && ml_score <= 0.0 {
            continue;
        }
        let blended = round4(keyword_score * BLEND_KEYWORD_WEIGHT + ml_score * BLEND_ML_WEIGHT);
        if blended >= RETAIN_THRESHOLD {
            filtered.insert((*theme).to_owned(), blended);
        }
    }

    if filtered.is_empty() {
        let mut ranked: Vec<(&String, f64)> =
            keyword_scores.iter().map(|(theme, score)| (theme, *score)).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        for (theme, score) in ranked.into_iter().take(FALLBACK_TOP_N) {
            if score > 0.0 {
                filtered.insert(theme.clone(), score.max(FALLBACK_FLOOR));
            }
        }
    }

    if filtered.is_empty() {
        zeroed_taxonomy()
    } else {
        filtered
    }
}
