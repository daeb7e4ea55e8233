//! Push command implementation
//!
//! Pushes published articles from a local article file to DOAJ, creating
//! or updating one registry record per article.

use crate::adapters::store::ArticleStore;
use crate::cli::commands::{build_runtime, push_options, EXIT_CONFIG_ERROR, EXIT_PARTIAL_FAILURE};
use crate::config::load_config;
use crate::core::Pusher;
use clap::Args;

/// Arguments for the push command
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Path to a JSON file containing the articles to push
    #[arg(long)]
    pub articles: String,

    /// Push only the article with this key
    #[arg(long)]
    pub key: Option<String>,

    /// Dry run mode - compute and log payloads without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first failed article instead of continuing
    #[arg(long)]
    pub stop_on_error: bool,
}

impl PushArgs {
    /// Execute the push command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(articles = %self.articles, "Starting push command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if self.dry_run {
            tracing::info!("Dry run mode enabled - nothing will be sent");
            println!("🔍 DRY RUN MODE - No records will be sent to DOAJ");
            println!();
        }

        let (http, store) = build_runtime(&config, &self.articles)?;
        let pusher = Pusher::new(http, store.clone(), push_options(&config, self.dry_run));

        let mut articles = store.published_articles().await?;
        if let Some(key) = &self.key {
            articles.retain(|a| &a.key == key);
            if articles.is_empty() {
                eprintln!("No published article with key '{key}' in {}", self.articles);
                return Ok(EXIT_CONFIG_ERROR);
            }
        }

        println!("🚀 Pushing {} article(s)...", articles.len());
        let summary = pusher.push_batch(&articles, self.stop_on_error).await?;

        println!();
        println!("Push summary:");
        println!("  Pushed:  {}", summary.pushed.len());
        println!("  Skipped: {}", summary.skipped.len());
        println!("  Failed:  {}", summary.failed.len());
        for (key, error) in &summary.failed {
            println!("    {key}: {error}");
        }

        if summary.is_clean() {
            Ok(0)
        } else {
            Ok(EXIT_PARTIAL_FAILURE)
        }
    }
}
