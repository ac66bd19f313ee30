//! Corpus-level statistics aggregation.
//!
//! A single pass over the annotated comments accumulates every distribution
//! the dashboard needs. The fold is pure: same input list, same output, no
//! shared state between calls, and chunked invocations concatenate to the
//! same result as one pass over the full list.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::annotate::AnnotatedComment;
use crate::sentiment::{round4, round_to, Sentiment};

// A theme counts as present in a comment above this score.
const THEME_PRESENCE_THRESHOLD: f64 = 0.05;
// The breakdown fallback admits themes whose average raw score clears this.
const BREAKDOWN_FALLBACK_THRESHOLD: f64 = 0.01;
const MAX_BREAKDOWN_ENTRIES: usize = 15;
const HIGH_CONFIDENCE: f64 = 0.8;
const MEDIUM_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolarityDistribution {
    pub strongly_positive: u64,
    pub moderately_positive: u64,
    pub neutral: u64,
    pub moderately_negative: u64,
    pub strongly_negative: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailedAverages {
    pub positive_score: f64,
    pub negative_score: f64,
    pub neutral_score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentRatios {
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub neutral_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeCount {
    pub theme: String,
    pub count: u64,
}

/// Corpus-wide statistics. Every sub-structure is always present; an empty
/// corpus yields the zeroed shape rather than missing keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total: u64,
    pub categories: CategoryCounts,
    pub average_polarity: f64,
    pub language_distribution: BTreeMap<String, u64>,
    /// Sorted by count descending, theme name ascending on ties.
    pub themes: Vec<ThemeCount>,
    pub confidence_distribution: ConfidenceDistribution,
    pub polarity_distribution: PolarityDistribution,
    pub detailed_averages: DetailedAverages,
    pub sentiment_ratios: SentimentRatios,
}

impl Default for CorpusStats {
    fn default() -> Self {
        let mut language_distribution = BTreeMap::new();
        language_distribution.insert("tr".to_owned(), 0);
        language_distribution.insert("en".to_owned(), 0);
        Self {
            total: 0,
            categories: CategoryCounts::default(),
            average_polarity: 0.0,
            language_distribution,
            themes: Vec::new(),
            confidence_distribution: ConfidenceDistribution::default(),
            polarity_distribution: PolarityDistribution::default(),
            detailed_averages: DetailedAverages::default(),
            sentiment_ratios: SentimentRatios::default(),
        }
    }
}

/// Ranked theme summary for the dashboard, capped at 15 entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeBreakdownEntry {
    pub theme: String,
    pub count: u64,
    pub percentage: f64,
    pub avg_score: f64,
}

/// Reduce annotated comments into corpus statistics.
pub fn corpus_stats(comments: &[AnnotatedComment]) -> CorpusStats {
    let mut stats = CorpusStats::default();
    if comments.is_empty() {
        return stats;
    }

    let mut theme_counts: HashMap<&str, u64> = HashMap::new();
    let mut total_polarity = 0.0;
    let mut positive_score_sum = 0.0;
    let mut negative_score_sum = 0.0;
    let mut neutral_score_sum = 0.0;

    for comment in comments {
        let sentiment = &comment.sentiment;

        match sentiment.category {
            Sentiment::Positive => stats.categories.positive += 1,
            Sentiment::Negative => stats.categories.negative += 1,
            Sentiment::Neutral => stats.categories.neutral += 1,
        }

        positive_score_sum += sentiment.detailed_scores.positive_score;
        negative_score_sum += sentiment.detailed_scores.negative_score;
        neutral_score_sum += sentiment.detailed_scores.neutral_score;

        if sentiment.confidence > HIGH_CONFIDENCE {
            stats.confidence_distribution.high += 1;
        } else if sentiment.confidence > MEDIUM_CONFIDENCE {
            stats.confidence_distribution.medium += 1;
        } else {
            stats.confidence_distribution.low += 1;
        }

        if sentiment.polarity > 0.5 {
            stats.polarity_distribution.strongly_positive += 1;
        } else if sentiment.polarity > 0.1 {
            stats.polarity_distribution.moderately_positive += 1;
        } else if sentiment.polarity > -0.1 {
            stats.polarity_distribution.neutral += 1;
        } else if sentiment.polarity > -0.5 {
            stats.polarity_distribution.moderately_negative += 1;
        } else {
            stats.polarity_distribution.strongly_negative += 1;
        }

        for (theme, score) in &sentiment.theme {
            if *score > THEME_PRESENCE_THRESHOLD {
                *theme_counts.entry(theme.as_str()).or_insert(0) += 1;
            }
        }

        *stats
            .language_distribution
            .entry(sentiment.language.as_str().to_owned())
            .or_insert(0) += 1;

        total_polarity += sentiment.polarity;
    }

    let total = comments.len() as f64;
    stats.total = comments.len() as u64;
    stats.average_polarity = round4(total_polarity / total);
    stats.detailed_averages = DetailedAverages {
        positive_score: round4(positive_score_sum / total),
        negative_score: round4(negative_score_sum / total),
        neutral_score: round4(neutral_score_sum / total),
    };
    stats.sentiment_ratios = SentimentRatios {
        positive_ratio: round4(stats.categories.positive as f64 / total),
        negative_ratio: round4(stats.categories.negative as f64 / total),
        neutral_ratio: round4(stats.categories.neutral as f64 / total),
    };

    let mut themes: Vec<ThemeCount> = theme_counts
        .into_iter()
        .map(|(theme, count)| ThemeCount {
            theme: theme.to_owned(),
            count,
        })
        .collect();
    themes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.theme.cmp(&b.theme)));
    stats.themes = themes;

    stats
}

/// Ranked theme summary across the corpus.
///
/// Primary path counts themes clearing the presence threshold per comment.
/// When nothing clears it, the fallback ranks themes by their average raw
/// score so the dashboard never shows an empty panel for a corpus with any
/// theme signal.
pub fn theme_breakdown(comments: &[AnnotatedComment]) -> Vec<ThemeBreakdownEntry> {
    let total = comments.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut scores: HashMap<&str, Vec<f64>> = HashMap::new();
    for comment in comments {
        for (theme, score) in &comment.theme {
            if *score > THEME_PRESENCE_THRESHOLD {
                *counts.entry(theme.as_str()).or_insert(0) += 1;
                scores.entry(theme.as_str()).or_default().push(*score);
            }
        }
    }

    let mut entries: Vec<ThemeBreakdownEntry> = counts
        .into_iter()
        .map(|(theme, count)| {
            let theme_scores = &scores[theme];
            let avg = theme_scores.iter().sum::<f64>() / theme_scores.len() as f64;
            ThemeBreakdownEntry {
                theme: theme.to_owned(),
                count,
                percentage: round_to(count as f64 / total as f64 * 100.0, 2),
                avg_score: round_to(avg, 3),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.theme.cmp(&b.theme)));

    if entries.is_empty() {
        let mut all_scores: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for comment in comments {
            for (theme, score) in &comment.theme {
                all_scores.entry(theme.as_str()).or_default().push(*score);
            }
        }
        for (theme, theme_scores) in all_scores {
            let avg = theme_scores.iter().sum::<f64>() / theme_scores.len() as f64;
            if avg > BREAKDOWN_FALLBACK_THRESHOLD {
                entries.push(ThemeBreakdownEntry {
                    theme: theme.to_owned(),
                    count: theme_scores.len() as u64,
                    percentage: round_to(theme_scores.len() as f64 / total as f64 * 100.0, 2),
                    avg_score: round_to(avg, 3),
                });
            }
        }
        entries.sort_by(|a, b| {
            b.avg_score
                .partial_cmp(&a.avg_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.theme.cmp(&b.theme))
        });
    }

    entries.truncate(MAX_BREAKDOWN_ENTRIES);
    entries
}
