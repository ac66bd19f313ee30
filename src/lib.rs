//! Sentiment and theme aggregation engine for short user comments.
//!
//! Turns a batch of comments into per-comment sentiment/theme annotations and
//! corpus-level statistics (category distribution, polarity histogram, theme
//! prevalence, weighted word cloud) for an analytics dashboard. Model
//! inference is consumed through injectable backends; everything else is
//! deterministic computation.

pub mod annotate;
pub mod config;
pub mod error;
pub mod language;
pub mod ml;
pub mod persistence;
pub mod sentiment;
pub mod stats;
pub mod text;
pub mod themes;
pub mod wordcloud;

pub use annotate::{AnalysisEngine, AnalysisReport, AnnotatedComment, RawComment};
pub use config::EngineConfig;
pub use error::AnalysisError;
pub use language::Language;
pub use sentiment::{Sentiment, SentimentResult, ThemeScoreMap};
pub use stats::{corpus_stats, theme_breakdown, CorpusStats, ThemeBreakdownEntry};
pub use wordcloud::{word_cloud, WordCloudEntry, DEFAULT_MAX_WORDS};
