use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;

use comment_pulse::ml::{LexiconClassifier, RemoteClassifier, SentimentBackend, ThemeBackend};
use comment_pulse::{AnalysisEngine, EngineConfig, RawComment};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: comment-pulse <comments.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let comments: Vec<RawComment> =
        serde_json::from_str(&raw).context("input must be a JSON array of comments")?;

    let config = EngineConfig::from_env();

    // With a sidecar configured, both capabilities go remote; otherwise the
    // offline lexicon handles sentiment and themes stay keyword-only.
    let (sentiment_backend, theme_backend): (Arc<dyn SentimentBackend>, Option<Arc<dyn ThemeBackend>>) =
        if std::env::var("ML_SIDECAR_URL").is_ok() {
            let remote = Arc::new(RemoteClassifier::new(
                config.sidecar_url.clone(),
                config.request_timeout,
            ));
            (remote.clone(), Some(remote))
        } else {
            info!("ML_SIDECAR_URL not set, using the offline lexicon classifier");
            (Arc::new(LexiconClassifier::new()), None)
        };

    let engine = Arc::new(AnalysisEngine::new(config, sentiment_backend, theme_backend));

    info!(total = comments.len(), "analyzing comments");
    let report = engine.analyze(&comments, None, None).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
