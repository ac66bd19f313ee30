//! Shape of the analysis document handed to the external store.
//!
//! The store itself (Firestore or otherwise) is a collaborator outside this
//! crate; this module only pins the field names it expects.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::annotate::AnalysisReport;
use crate::language::Language;
use crate::sentiment::Sentiment;
use crate::stats::CategoryCounts;
use crate::wordcloud::WordCloudEntry;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    pub id: String,
    pub user_id: String,
    pub video_id: Option<String>,
    pub video_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sentiment_stats: PersistedStats,
    pub word_cloud: Vec<WordCloudEntry>,
    pub comments: Vec<CommentSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStats {
    pub total: u64,
    pub categories: CategoryCounts,
    pub average_polarity: f64,
    pub language_distribution: std::collections::BTreeMap<String, u64>,
    /// Theme name to occurrence count, highest first.
    pub themes: Map<String, Value>,
}

/// Compact per-comment summary stored alongside the aggregate stats.
#[derive(Debug, Clone, Serialize)]
pub struct CommentSummary {
    pub id: String,
    pub polarity: f64,
    pub category: Sentiment,
    pub confidence: f64,
    pub language: Language,
}

impl AnalysisDocument {
    pub fn new(user_id: impl Into<String>, report: &AnalysisReport) -> Self {
        let stats = &report.sentiment_stats;
        let themes: Map<String, Value> = stats
            .themes
            .iter()
            .map(|entry| (entry.theme.clone(), Value::from(entry.count)))
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            video_id: report.video_id.clone(),
            video_title: report.video_title.clone(),
            created_at: Utc::now(),
            sentiment_stats: PersistedStats {
                total: stats.total,
                categories: stats.categories.clone(),
                average_polarity: stats.average_polarity,
                language_distribution: stats.language_distribution.clone(),
                themes,
            },
            word_cloud: report.word_cloud.clone(),
            comments: report
                .comments
                .iter()
                .map(|comment| CommentSummary {
                    id: comment.id.clone(),
                    polarity: comment.sentiment.polarity,
                    category: comment.sentiment.category,
                    confidence: comment.sentiment.confidence,
                    language: comment.sentiment.language,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{CorpusStats, ThemeCount};

    fn report() -> AnalysisReport {
        let mut stats = CorpusStats::default();
        stats.total = 2;
        stats.categories.positive = 2;
        stats.average_polarity = 0.42;
        stats.themes = vec![
            ThemeCount { theme: "teaching".to_owned(), count: 2 },
            ThemeCount { theme: "comedy".to_owned(), count: 1 },
        ];
        AnalysisReport {
            video_id: Some("vid123".to_owned()),
            video_title: Some("a title".to_owned()),
            total_comments: 2,
            sentiment_stats: stats,
            word_cloud: Vec::new(),
            theme_analysis: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_document_field_names() {
        let document = AnalysisDocument::new("user-1", &report());
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["videoId"], "vid123");
        assert!(json.get("createdAt").is_some());
        let stats = &json["sentimentStats"];
        assert_eq!(stats["total"], 2);
        assert_eq!(stats["categories"]["positive"], 2);
        assert_eq!(stats["averagePolarity"], 0.42);
        assert!(stats.get("languageDistribution").is_some());
        assert_eq!(stats["themes"]["teaching"], 2);
    }

    #[test]
    fn test_themes_keep_rank_order() {
        let document = AnalysisDocument::new("user-1", &report());
        let keys: Vec<&String> = document.sentiment_stats.themes.keys().collect();
        assert_eq!(keys, vec!["teaching", "comedy"]);
    }
}
