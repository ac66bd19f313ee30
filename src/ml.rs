//! Classifier backends for the analysis engine.
//!
//! Model inference is consumed as an opaque capability: a per-language
//! sentence sentiment classifier and a zero-shot multi-label theme
//! classifier. Both sit behind async traits so the remote model sidecar, the
//! offline lexicon backend and deterministic test stubs are interchangeable.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::error::AnalysisError;
use crate::language::Language;

/// Raw output of the per-sentence sentiment capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentencePrediction {
    pub label: String,
    pub score: f64,
}

/// Raw output of the zero-shot theme capability. `labels` and `scores` are
/// parallel arrays, restricted to the candidate labels passed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZeroShotPrediction {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

#[async_trait]
pub trait SentimentBackend: Send + Sync {
    async fn classify(
        &self,
        language: Language,
        sentence: &str,
    ) -> Result<SentencePrediction, AnalysisError>;
}

#[async_trait]
pub trait ThemeBackend: Send + Sync {
    async fn zero_shot(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<ZeroShotPrediction, AnalysisError>;
}

// ============================================================================
// Remote backend (model sidecar over HTTP)
// ============================================================================

/// Calls the local model sidecar for inference.
pub struct RemoteClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClassifier {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SentimentBackend for RemoteClassifier {
    async fn classify(
        &self,
        language: Language,
        sentence: &str,
    ) -> Result<SentencePrediction, AnalysisError> {
        let res = self
            .client
            .post(format!("{}/ml/sentiment", self.base_url))
            .json(&serde_json::json!({ "language": language.as_str(), "text": sentence }))
            .send()
            .await
            .map_err(|e| {
                AnalysisError::ClassifierUnavailable(format!("sentiment request failed: {e}"))
            })?;

        if !res.status().is_success() {
            return Err(AnalysisError::ClassifierUnavailable(format!(
                "sentiment sidecar returned status {}",
                res.status()
            )));
        }

        res.json::<SentencePrediction>().await.map_err(|e| {
            AnalysisError::ClassifierUnavailable(format!("sentiment parse error: {e}"))
        })
    }
}

#[async_trait]
impl ThemeBackend for RemoteClassifier {
    async fn zero_shot(
        &self,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<ZeroShotPrediction, AnalysisError> {
        let res = self
            .client
            .post(format!("{}/ml/zero-shot", self.base_url))
            .json(&serde_json::json!({ "text": text, "candidate_labels": candidate_labels }))
            .send()
            .await
            .map_err(|e| {
                AnalysisError::ClassifierUnavailable(format!("zero-shot request failed: {e}"))
            })?;

        if !res.status().is_success() {
            return Err(AnalysisError::ClassifierUnavailable(format!(
                "zero-shot sidecar returned status {}",
                res.status()
            )));
        }

        res.json::<ZeroShotPrediction>().await.map_err(|e| {
            AnalysisError::ClassifierUnavailable(format!("zero-shot parse error: {e}"))
        })
    }
}

// ============================================================================
// Offline lexicon backend
// ============================================================================

static POSITIVE_WORDS_EN: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "amazing", "wonderful", "fantastic", "superb",
        "outstanding", "brilliant", "love", "loved", "loving", "best", "better", "happy",
        "joy", "beautiful", "perfect", "awesome", "incredible", "delightful", "pleasant",
        "satisfying", "recommend", "impressive", "exceptional", "remarkable", "helpful",
        "reliable", "quality", "valuable", "useful", "informative", "entertaining", "funny",
        "thanks", "thank",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS_EN: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "poor", "worst", "worse", "hate", "hated",
        "dislike", "disappointing", "disappointed", "failure", "failed", "fail", "sad",
        "unhappy", "angry", "annoyed", "frustrated", "frustrating", "problem", "problems",
        "issue", "issues", "broken", "error", "errors", "mistake", "wrong", "useless",
        "waste", "boring", "misleading", "clickbait", "unwatchable", "slow", "confusing",
    ]
    .into_iter()
    .collect()
});

static POSITIVE_WORDS_TR: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "güzel", "harika", "mükemmel", "süper", "iyi", "başarılı", "muhteşem", "efsane",
        "sevdim", "beğendim", "teşekkür", "teşekkürler", "faydalı", "yararlı", "eğlenceli",
        "komik", "kaliteli", "akıcı", "öğretici", "samimi",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS_TR: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "kötü", "berbat", "rezalet", "saçma", "sıkıcı", "boşuna", "nefret", "yalan",
        "gereksiz", "yetersiz", "vasat", "hata", "hatalı", "sorun", "sorunlu", "yavaş",
        "anlamsız", "kandırmaca",
    ]
    .into_iter()
    .collect()
});

const POSITIVE_RATIO_THRESHOLD: f64 = 0.6;
const NEGATIVE_RATIO_THRESHOLD: f64 = 0.4;

/// Word-list sentiment classifier. Deterministic and dependency-free, used
/// when no model sidecar is configured and as a stable baseline in tests.
#[derive(Debug, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    fn word_sets(
        language: Language,
    ) -> (&'static HashSet<&'static str>, &'static HashSet<&'static str>) {
        match language {
            Language::Tr => (&POSITIVE_WORDS_TR, &NEGATIVE_WORDS_TR),
            Language::En => (&POSITIVE_WORDS_EN, &NEGATIVE_WORDS_EN),
        }
    }
}

#[async_trait]
impl SentimentBackend for LexiconClassifier {
    async fn classify(
        &self,
        language: Language,
        sentence: &str,
    ) -> Result<SentencePrediction, AnalysisError> {
        let (positive_set, negative_set) = Self::word_sets(language);

        let lowered = sentence.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .collect();

        let positive = words.iter().filter(|w| positive_set.contains(*w)).count() as f64;
        let negative = words.iter().filter(|w| negative_set.contains(*w)).count() as f64;
        let total = positive + negative;

        if total == 0.0 {
            return Ok(SentencePrediction {
                label: "neutral".to_owned(),
                score: 0.5,
            });
        }

        let positive_ratio = positive / total;
        let (label, score) = if positive_ratio > POSITIVE_RATIO_THRESHOLD {
            ("positive", positive_ratio)
        } else if positive_ratio < NEGATIVE_RATIO_THRESHOLD {
            ("negative", 1.0 - positive_ratio)
        } else {
            ("neutral", 0.5 + (positive_ratio - 0.5).abs())
        };

        Ok(SentencePrediction {
            label: label.to_owned(),
            score,
        })
    }
}
