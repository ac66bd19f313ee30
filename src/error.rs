use thiserror::Error;

/// Tagged error kinds for the analysis engine.
///
/// Per-comment classifier failures never surface here — they degrade the
/// affected comment to a neutral low-confidence result and the batch keeps
/// going. These variants are for the cases callers must distinguish.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The external sentiment/theme capability failed or timed out.
    #[error("classifier backend unavailable: {0}")]
    ClassifierUnavailable(String),

    /// A comment is missing its required text.
    #[error("malformed comment {id}: {reason}")]
    MalformedInput { id: String, reason: String },

    /// Zero comments supplied to an operation that requires at least one.
    /// Aggregation functions never raise this; they return zeroed shapes.
    #[error("empty corpus")]
    EmptyCorpus,
}
