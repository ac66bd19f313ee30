//! Per-comment annotation and batch orchestration.
//!
//! The engine composes the normalizer, language detector, sentiment backend
//! and theme classifier into one annotated comment, and fans a batch out over
//! tokio tasks in fixed-size chunks while preserving input order.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::AnalysisError;
use crate::language::detect_language;
use crate::ml::{SentimentBackend, ThemeBackend};
use crate::sentiment::{self, SentenceJudgment, Sentiment, SentimentResult, ThemeScoreMap};
use crate::stats::{self, CorpusStats, ThemeBreakdownEntry, ThemeCount};
use crate::text;
use crate::themes;
use crate::wordcloud::{self, WordCloudEntry};

/// One comment as supplied by the caller. Owned by the caller; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComment {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_title: Option<String>,
}

impl RawComment {
    /// Boundary validation; annotation requires non-empty text.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.text.trim().is_empty() {
            return Err(AnalysisError::MalformedInput {
                id: self.id.clone(),
                reason: "missing comment text".to_owned(),
            });
        }
        Ok(())
    }
}

/// A comment enriched with sentiment and theme annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedComment {
    pub id: String,
    pub text: String,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub video_id: Option<String>,
    pub video_title: Option<String>,
    pub sentiment: SentimentResult,
    pub theme: ThemeScoreMap,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub video_id: Option<String>,
    pub video_title: Option<String>,
    pub total_comments: usize,
    pub sentiment_stats: CorpusStats,
    pub word_cloud: Vec<WordCloudEntry>,
    pub theme_analysis: Vec<ThemeBreakdownEntry>,
    pub comments: Vec<AnnotatedComment>,
}

/// Analysis context constructed once at startup. Backends are injected so
/// tests substitute deterministic stubs; the engine holds no other state and
/// is safe to share across tasks.
pub struct AnalysisEngine {
    config: EngineConfig,
    sentiment_backend: Arc<dyn SentimentBackend>,
    theme_backend: Option<Arc<dyn ThemeBackend>>,
}

impl AnalysisEngine {
    pub fn new(
        config: EngineConfig,
        sentiment_backend: Arc<dyn SentimentBackend>,
        theme_backend: Option<Arc<dyn ThemeBackend>>,
    ) -> Self {
        Self {
            config,
            sentiment_backend,
            theme_backend,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Annotate a single comment. Classifier failure degrades the result to
    /// the neutral low-confidence default instead of propagating.
    pub async fn annotate(&self, comment: &RawComment) -> AnnotatedComment {
        let sentiment = self.analyze_text(&comment.text).await;
        if let Some(reason) = &sentiment.error {
            warn!(comment_id = %comment.id, "sentiment classification degraded: {reason}");
        }

        AnnotatedComment {
            id: comment.id.clone(),
            text: comment.text.clone(),
            author: comment.author.clone(),
            published_at: comment.published_at.clone(),
            video_id: comment.video_id.clone(),
            video_title: comment.video_title.clone(),
            theme: sentiment.theme.clone(),
            sentiment,
        }
    }

    async fn analyze_text(&self, raw_text: &str) -> SentimentResult {
        let language = detect_language(raw_text);

        let mut sentences = text::split_sentences(raw_text);
        if sentences.is_empty() {
            sentences = vec![raw_text.to_owned()];
        }

        let mut judgments = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            match self.sentiment_backend.classify(language, &sentence).await {
                Ok(prediction) => judgments.push(SentenceJudgment {
                    text: sentence,
                    label: Sentiment::from_label(&prediction.label),
                    score: prediction.score.clamp(0.0, 1.0),
                }),
                Err(err) => {
                    let mut degraded = sentiment::degraded_result(err.to_string());
                    degraded.theme = themes::zeroed_taxonomy();
                    return degraded;
                }
            }
        }

        let mut result = sentiment::aggregate_judgments(language, judgments);
        let cleaned = text::clean_text(raw_text);
        result.theme =
            themes::classify_themes(self.theme_backend.as_deref(), raw_text, &cleaned).await;
        result
    }

    /// Annotate a batch, preserving input order.
    ///
    /// Comments without text are skipped and logged. Per-comment classifier
    /// failures degrade that comment only. The batch as a whole errors only
    /// when every annotated comment carries a classifier failure marker,
    /// which means the backend itself is down.
    pub async fn annotate_batch(
        self: &Arc<Self>,
        comments: &[RawComment],
    ) -> Result<Vec<AnnotatedComment>, AnalysisError> {
        let chunk_size = self.config.chunk_size.max(1);
        let total = comments.len();
        let mut annotated = Vec::with_capacity(total);

        for (chunk_index, chunk) in comments.chunks(chunk_size).enumerate() {
            let mut handles = Vec::with_capacity(chunk.len());
            for comment in chunk {
                if let Err(err) = comment.validate() {
                    warn!("skipping comment: {err}");
                    continue;
                }
                let engine = Arc::clone(self);
                let comment = comment.clone();
                handles.push(tokio::spawn(
                    async move { engine.annotate(&comment).await },
                ));
            }

            for handle in handles {
                match handle.await {
                    Ok(result) => annotated.push(result),
                    Err(err) => warn!("annotation task failed: {err}"),
                }
            }

            info!(
                chunk = chunk_index + 1,
                annotated = annotated.len(),
                total,
                "annotated chunk"
            );
        }

        if !annotated.is_empty() && annotated.iter().all(|c| c.sentiment.error.is_some()) {
            return Err(AnalysisError::ClassifierUnavailable(
                "every comment in the batch failed sentiment classification".to_owned(),
            ));
        }

        Ok(annotated)
    }

    /// One-shot analysis: annotate, aggregate, build the word cloud and the
    /// theme breakdown. The stats theme counts are backfilled from the
    /// breakdown so both views agree.
    pub async fn analyze(
        self: &Arc<Self>,
        comments: &[RawComment],
        video_id: Option<String>,
        video_title: Option<String>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let annotated = self.annotate_batch(comments).await?;

        let mut sentiment_stats = stats::corpus_stats(&annotated);
        let word_cloud = wordcloud::word_cloud(&annotated, self.config.max_words);
        let theme_analysis = stats::theme_breakdown(&annotated);

        sentiment_stats.themes = theme_analysis
            .iter()
            .map(|entry| ThemeCount {
                theme: entry.theme.clone(),
                count: entry.count,
            })
            .collect();

        Ok(AnalysisReport {
            video_id,
            video_title,
            total_comments: annotated.len(),
            sentiment_stats,
            word_cloud,
            theme_analysis,
            comments: annotated,
        })
    }
}
