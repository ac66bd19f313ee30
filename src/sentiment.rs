//! Document-level sentiment aggregation.
//!
//! Folds per-sentence classifier judgments into one polarity score, one
//! category and one confidence value per comment. Pure and deterministic:
//! the same judgments always produce the same result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::language::Language;

/// Sparse mapping from theme name to score in [0, 1]. Ordered so serialized
/// results are reproducible byte for byte.
pub type ThemeScoreMap = BTreeMap<String, f64>;

// Neutral mass above this dampens polarity towards zero.
const NEUTRAL_DAMPING_THRESHOLD: f64 = 0.6;
const NEUTRAL_DAMPING_FACTOR: f64 = 0.5;
// A category needs both a count majority and a weighted score above this.
const CATEGORY_SCORE_FLOOR: f64 = 0.5;
// Below this ceiling on every weighted score the output is forced neutral.
const LOW_SIGNAL_CEILING: f64 = 0.3;
const LOW_SIGNAL_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Normalize the label vocabulary coming out of a classifier backend.
    /// Anything that is not a positive/negative variant counts as neutral.
    pub fn from_label(label: &str) -> Sentiment {
        match label.to_lowercase().as_str() {
            "positive" | "pos" => Sentiment::Positive,
            "negative" | "neg" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

/// One classified sentence. Ephemeral: consumed by [`aggregate_judgments`]
/// and carried on the result for auditability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceJudgment {
    pub text: String,
    pub label: Sentiment,
    pub score: f64,
}

/// Intermediate per-category sums and counts, kept on the document result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailedScores {
    pub positive_score: f64,
    pub negative_score: f64,
    pub neutral_score: f64,
    pub positive_count: u32,
    pub negative_count: u32,
    pub neutral_count: u32,
}

/// Document-level sentiment for one comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub category: Sentiment,
    pub confidence: f64,
    pub language: Language,
    pub sentence_judgments: Vec<SentenceJudgment>,
    pub theme: ThemeScoreMap,
    pub detailed_scores: DetailedScores,
    /// Set only when the classifier backend failed for this comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

pub(crate) fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

/// Fold per-sentence judgments into one document-level result.
///
/// Weighted per-category averages are taken over the total sentence count,
/// polarity is the positive-negative gap (dampened when neutral mass
/// dominates), and the category requires both a strict count majority and a
/// weighted score above 0.5. Uniformly weak scores force a neutral result.
pub fn aggregate_judgments(language: Language, judgments: Vec<SentenceJudgment>) -> SentimentResult {
    let total = judgments.len().max(1) as f64;

    let mut positive_sum = 0.0;
    let mut negative_sum = 0.0;
    let mut neutral_sum = 0.0;
    let mut positive_count = 0u32;
    let mut negative_count = 0u32;
    let mut neutral_count = 0u32;

    for judgment in &judgments {
        match judgment.label {
            Sentiment::Positive => {
                positive_sum += judgment.score;
                positive_count += 1;
            }
            Sentiment::Negative => {
                negative_sum += judgment.score;
                negative_count += 1;
            }
            Sentiment::Neutral => {
                neutral_sum += judgment.score;
                neutral_count += 1;
            }
        }
    }

    let weighted_positive = positive_sum / total;
    let weighted_negative = negative_sum / total;
    let weighted_neutral = neutral_sum / total;

    let mut polarity = weighted_positive - weighted_negative;
    if weighted_neutral > NEUTRAL_DAMPING_THRESHOLD {
        polarity *= 1.0 - weighted_neutral * NEUTRAL_DAMPING_FACTOR;
    }

    let (mut category, mut confidence) = if positive_count > negative_count
        && positive_count > neutral_count
        && weighted_positive > CATEGORY_SCORE_FLOOR
    {
        (Sentiment::Positive, weighted_positive)
    } else if negative_count > positive_count
        && negative_count > neutral_count
        && weighted_negative > CATEGORY_SCORE_FLOOR
    {
        (Sentiment::Negative, weighted_negative)
    } else {
        (Sentiment::Neutral, weighted_neutral.max(CATEGORY_SCORE_FLOOR))
    };

    if weighted_positive.max(weighted_negative).max(weighted_neutral) < LOW_SIGNAL_CEILING {
        category = Sentiment::Neutral;
        polarity = 0.0;
        confidence = LOW_SIGNAL_CONFIDENCE;
    }

    SentimentResult {
        polarity: round4(polarity),
        category,
        confidence: round4(confidence),
        language,
        sentence_judgments: judgments,
        theme: ThemeScoreMap::new(),
        detailed_scores: DetailedScores {
            positive_score: round4(weighted_positive),
            negative_score: round4(weighted_negative),
            neutral_score: round4(weighted_neutral),
            positive_count,
            negative_count,
            neutral_count,
        },
        error: None,
    }
}

/// Neutral low-confidence default used when the classifier backend fails
/// for a comment. The batch continues; the marker records why.
pub fn degraded_result(reason: String) -> SentimentResult {
    SentimentResult {
        polarity: 0.0,
        category: Sentiment::Neutral,
        confidence: LOW_SIGNAL_CONFIDENCE,
        language: Language::En,
        sentence_judgments: Vec::new(),
        theme: ThemeScoreMap::new(),
        detailed_scores: DetailedScores {
            positive_score: 0.0,
            negative_score: 0.0,
            neutral_score: LOW_SIGNAL_CONFIDENCE,
            positive_count: 0,
            negative_count: 0,
            neutral_count: 1,
        },
        error: Some(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judgment(label: Sentiment, score: f64) -> SentenceJudgment {
        SentenceJudgment {
            text: "s".to_owned(),
            label,
            score,
        }
    }

    #[test]
    fn test_label_normalization() {
        assert_eq!(Sentiment::from_label("POSITIVE"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("pos"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("Neg"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label(""), Sentiment::Neutral);
    }

    #[test]
    fn test_all_positive_sentences() {
        let result = aggregate_judgments(
            Language::En,
            vec![judgment(Sentiment::Positive, 0.9), judgment(Sentiment::Positive, 0.8)],
        );
        assert_eq!(result.category, Sentiment::Positive);
        assert!((result.polarity - 0.85).abs() < 1e-9);
        assert!((result.confidence - 0.85).abs() < 1e-9);
        assert_eq!(result.detailed_scores.positive_count, 2);
    }

    #[test]
    fn test_positive_neutral_tie_falls_to_neutral() {
        // weighted_positive = 0.45, weighted_neutral = 0.475; count tie and
        // positive below the 0.5 floor, so the result is neutral with
        // confidence max(0.475, 0.5) = 0.5.
        let result = aggregate_judgments(
            Language::En,
            vec![judgment(Sentiment::Positive, 0.9), judgment(Sentiment::Neutral, 0.95)],
        );
        assert_eq!(result.category, Sentiment::Neutral);
        assert!((result.confidence - 0.5).abs() < 1e-9);
        assert!((result.detailed_scores.positive_score - 0.45).abs() < 1e-9);
        assert!((result.detailed_scores.neutral_score - 0.475).abs() < 1e-9);
        // Neutral mass is below 0.6, so polarity is not dampened.
        assert!((result.polarity - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_damping() {
        // Two strong neutral sentences push neutral mass over 0.6, which
        // shrinks the polarity gap.
        let result = aggregate_judgments(
            Language::En,
            vec![
                judgment(Sentiment::Positive, 0.6),
                judgment(Sentiment::Neutral, 0.95),
                judgment(Sentiment::Neutral, 0.95),
            ],
        );
        let weighted_positive = 0.6 / 3.0;
        let weighted_neutral = 1.9 / 3.0;
        let expected = weighted_positive * (1.0 - weighted_neutral * 0.5);
        assert!((result.polarity - round4(expected)).abs() < 1e-9);
        assert_eq!(result.category, Sentiment::Neutral);
    }

    #[test]
    fn test_low_signal_override() {
        let result = aggregate_judgments(
            Language::En,
            vec![
                judgment(Sentiment::Positive, 0.2),
                judgment(Sentiment::Negative, 0.1),
                judgment(Sentiment::Neutral, 0.15),
            ],
        );
        assert_eq!(result.category, Sentiment::Neutral);
        assert_eq!(result.polarity, 0.0);
        assert!((result.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_negative_majority_with_confidence() {
        let result = aggregate_judgments(
            Language::Tr,
            vec![
                judgment(Sentiment::Negative, 0.9),
                judgment(Sentiment::Negative, 0.85),
                judgment(Sentiment::Positive, 0.6),
            ],
        );
        assert_eq!(result.category, Sentiment::Negative);
        assert_eq!(result.language, Language::Tr);
        assert!(result.polarity < 0.0);
        assert!(result.polarity >= -1.0);
    }

    #[test]
    fn test_majority_without_confidence_floor_is_neutral() {
        // Three weak positive sentences: count majority but weighted score
        // 0.4 stays under the 0.5 floor.
        let result = aggregate_judgments(
            Language::En,
            vec![
                judgment(Sentiment::Positive, 0.4),
                judgment(Sentiment::Positive, 0.4),
                judgment(Sentiment::Positive, 0.4),
            ],
        );
        assert_eq!(result.category, Sentiment::Neutral);
        assert!((result.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_hold() {
        let result = aggregate_judgments(
            Language::En,
            vec![judgment(Sentiment::Positive, 1.0), judgment(Sentiment::Negative, 1.0)],
        );
        assert!(result.polarity >= -1.0 && result.polarity <= 1.0);
        assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
    }

    #[test]
    fn test_outputs_rounded_to_four_decimals() {
        let result = aggregate_judgments(
            Language::En,
            vec![
                judgment(Sentiment::Positive, 0.777777),
                judgment(Sentiment::Positive, 0.888888),
                judgment(Sentiment::Positive, 0.999999),
            ],
        );
        let scaled = result.polarity * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }

    #[test]
    fn test_degraded_result_shape() {
        let result = degraded_result("backend down".to_owned());
        assert_eq!(result.category, Sentiment::Neutral);
        assert_eq!(result.polarity, 0.0);
        assert!((result.confidence - 0.6).abs() < 1e-9);
        assert_eq!(result.language, Language::En);
        assert_eq!(result.detailed_scores.neutral_count, 1);
        assert!(result.error.is_some());
    }
}
