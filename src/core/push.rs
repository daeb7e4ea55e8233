//! Push orchestration
//!
//! Decides which articles qualify for deposit, drives the article client
//! for each one, and aggregates the outcome of batch pushes. Skips are
//! never errors: an article without a DOI, an unpublished article or a
//! disabled push feature all log a reason and move on.

use crate::adapters::doaj::{ArticleClient, HttpCore};
use crate::adapters::store::ArticleStore;
use crate::domain::{Article, DoajId, DoajSyncError, Result};
use std::sync::Arc;

/// Behavior switches for the pusher, read from configuration
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Master switch; with this off every push becomes a skip
    pub push_enabled: bool,

    /// Compute and log payloads without sending anything
    pub dry_run: bool,

    /// Delete-and-recreate once on an immutable-field rejection
    pub recreate_on_immutable_change: bool,
}

/// Outcome of a batch push
#[derive(Debug, Default)]
pub struct PushSummary {
    /// Keys of articles deposited successfully
    pub pushed: Vec<String>,

    /// Keys of articles skipped with a logged reason
    pub skipped: Vec<String>,

    /// Keys of articles that failed, with the error rendered as text
    pub failed: Vec<(String, String)>,
}

impl PushSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Pushes local articles into the registry
pub struct Pusher {
    http: Arc<HttpCore>,
    store: Arc<dyn ArticleStore>,
    options: PushOptions,
}

impl Pusher {
    pub fn new(http: Arc<HttpCore>, store: Arc<dyn ArticleStore>, options: PushOptions) -> Self {
        Self { http, store, options }
    }

    /// Push one article, returning its DOAJ id on success
    ///
    /// Returns `Ok(None)` when the article was skipped: push disabled,
    /// dry run, article unpublished, undated, or without a DOI.
    pub async fn push_article(&self, article: &Article) -> Result<Option<DoajId>> {
        if !self.options.push_enabled {
            tracing::debug!(article = %article.key, "Push disabled, skipping");
            return Ok(None);
        }
        if !article.published {
            tracing::warn!(article = %article.key, "Article is not published, skipping");
            return Ok(None);
        }
        if article.doi.is_none() {
            tracing::warn!(article = %article.key, "Article has no DOI, skipping");
            return Ok(None);
        }
        if article.date_published.is_none() {
            tracing::warn!(article = %article.key, "Article has no publication date, skipping");
            return Ok(None);
        }

        let known_id = self
            .store
            .registry_link(&article.key)
            .await?
            .map(|link| link.identifier);
        let updating = known_id.is_some();

        let mut client = ArticleClient::from_article(
            Arc::clone(&self.http),
            Arc::clone(&self.store),
            article,
            known_id,
            self.options.recreate_on_immutable_change,
        )?;

        if self.options.dry_run {
            tracing::info!(
                article = %article.key,
                updating,
                payload = %client.encode()?,
                "Dry run, payload not sent"
            );
            return Ok(None);
        }

        let doaj_id = client.upsert().await?;
        tracing::info!(article = %article.key, doaj_id = %doaj_id, updating, "Pushed article");
        Ok(Some(doaj_id))
    }

    /// Push a batch of articles with a throttle sleep between deposits
    ///
    /// Failures are isolated per article unless `stop_on_error` is set,
    /// in which case the remaining articles are left untouched.
    pub async fn push_batch(&self, articles: &[Article], stop_on_error: bool) -> Result<PushSummary> {
        let mut summary = PushSummary::default();

        for (i, article) in articles.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.http.throttle()).await;
            }
            match self.push_article(article).await {
                Ok(Some(_)) => summary.pushed.push(article.key.clone()),
                Ok(None) => summary.skipped.push(article.key.clone()),
                Err(e) => {
                    tracing::error!(article = %article.key, error = %e, "Push failed");
                    summary.failed.push((article.key.clone(), e.to_string()));
                    if stop_on_error {
                        break;
                    }
                }
            }
        }

        tracing::info!(
            pushed = summary.pushed.len(),
            skipped = summary.skipped.len(),
            failed = summary.failed.len(),
            "Batch push finished"
        );
        Ok(summary)
    }

    /// Delete an article's registry record
    ///
    /// Fails with a validation error when the article has no DOAJ link.
    pub async fn delete_article(&self, article_key: &str) -> Result<()> {
        let link = self.store.registry_link(article_key).await?.ok_or_else(|| {
            DoajSyncError::Validation(format!("article {article_key} has no DOAJ link to delete"))
        })?;

        if self.options.dry_run {
            tracing::info!(
                article = %article_key,
                doaj_id = %link.identifier,
                "Dry run, delete not sent"
            );
            return Ok(());
        }

        let mut client = ArticleClient::for_known_record(
            Arc::clone(&self.http),
            Arc::clone(&self.store),
            article_key,
            link.identifier,
        );
        client.delete().await
    }
}
