//! Reconciliation between the local store and the registry
//!
//! Two directions. Registry-driven sync walks the registry's records for
//! a journal ISSN and links each one to the local article sharing its
//! DOI. Local-driven sync walks published local articles and looks each
//! DOI up in the registry, optionally pushing the articles the registry
//! does not know yet. Both isolate per-item failures so one bad record
//! never aborts the walk.

use crate::adapters::doaj::records::SearchResult;
use crate::adapters::doaj::{HttpCore, SearchClient};
use crate::adapters::store::ArticleStore;
use crate::core::push::Pusher;
use crate::domain::{DoajId, DoajSyncError, Doi, Issn, RegistryError, Result};
use std::sync::Arc;

/// Outcome of one reconciliation run
#[derive(Debug, Default)]
pub struct SyncSummary {
    /// Articles newly linked to a registry record
    pub linked: Vec<String>,

    /// Articles whose link already existed
    pub already_linked: Vec<String>,

    /// Registry ids (registry-driven) or article keys (local-driven)
    /// with no counterpart on the other side
    pub unmatched: Vec<String>,

    /// Articles pushed because the registry had no record for them
    pub pushed: Vec<String>,

    /// Per-item failures, rendered as text
    pub errors: Vec<(String, String)>,
}

impl SyncSummary {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reconciles registry records with local articles
pub struct Syncer {
    http: Arc<HttpCore>,
    store: Arc<dyn ArticleStore>,
}

impl Syncer {
    pub fn new(http: Arc<HttpCore>, store: Arc<dyn ArticleStore>) -> Self {
        Self { http, store }
    }

    /// Registry-driven sync for one journal
    ///
    /// Pages through the registry's articles for `issn` and links each
    /// result carrying a DOI to the local article with the same DOI.
    /// Results without a DOI, with a malformed DOI or with no local
    /// counterpart are reported as unmatched.
    pub async fn sync_from_registry(&self, issn: &Issn) -> Result<SyncSummary> {
        let mut summary = SyncSummary::default();
        let search = SearchClient::new(Arc::clone(&self.http));
        let mut pager = search.search_by_eissn(issn);

        while let Some(results) = pager.try_next().await? {
            for result in results {
                if let Err(e) = self.reconcile_result(&result, &mut summary).await {
                    tracing::error!(doaj_id = %result.id, error = %e, "Reconciliation failed");
                    summary.errors.push((result.id.clone(), e.to_string()));
                }
            }
        }

        tracing::info!(
            issn = %issn,
            linked = summary.linked.len(),
            already_linked = summary.already_linked.len(),
            unmatched = summary.unmatched.len(),
            errors = summary.errors.len(),
            "Registry-driven sync finished"
        );
        Ok(summary)
    }

    async fn reconcile_result(&self, result: &SearchResult, summary: &mut SyncSummary) -> Result<()> {
        let Some(doi_str) = result.doi() else {
            tracing::debug!(doaj_id = %result.id, "Registry record has no DOI, cannot match");
            summary.unmatched.push(result.id.clone());
            return Ok(());
        };
        let Ok(doi) = Doi::new(doi_str) else {
            tracing::warn!(doaj_id = %result.id, doi = doi_str, "Registry record has a malformed DOI");
            summary.unmatched.push(result.id.clone());
            return Ok(());
        };

        let Some(article) = self.store.find_article_by_doi(&doi).await? else {
            tracing::debug!(doaj_id = %result.id, doi = %doi, "No local article for registry record");
            summary.unmatched.push(result.id.clone());
            return Ok(());
        };

        let doaj_id = DoajId::new(result.id.clone()).map_err(DoajSyncError::Validation)?;
        let (_, created) = self.store.ensure_registry_link(&article.key, &doaj_id).await?;
        if created {
            tracing::info!(article = %article.key, doaj_id = %doaj_id, "Linked article to registry record");
            summary.linked.push(article.key);
        } else {
            summary.already_linked.push(article.key);
        }
        Ok(())
    }

    /// Local-driven sync
    ///
    /// Looks every published, not-yet-linked local article with a DOI up
    /// in the registry by exact DOI. A single match gets linked; no match is either
    /// pushed (when `pusher` is given) or reported unmatched; multiple
    /// matches are an error for that article.
    pub async fn sync_from_local(&self, pusher: Option<&Pusher>) -> Result<SyncSummary> {
        let mut summary = SyncSummary::default();
        let search = SearchClient::new(Arc::clone(&self.http));
        let articles = self.store.published_articles().await?;

        let mut first = true;
        for article in &articles {
            let Some(doi) = &article.doi else {
                tracing::debug!(article = %article.key, "Article has no DOI, skipping");
                continue;
            };
            if self.store.registry_link(&article.key).await?.is_some() {
                summary.already_linked.push(article.key.clone());
                continue;
            }
            if !first {
                tokio::time::sleep(self.http.throttle()).await;
            }
            first = false;

            match search.search_by_doi(doi, true).one().await {
                Ok(result) => {
                    let doaj_id = DoajId::new(result.id)
                        .map_err(DoajSyncError::Validation)?;
                    let (_, created) =
                        self.store.ensure_registry_link(&article.key, &doaj_id).await?;
                    if created {
                        tracing::info!(article = %article.key, doaj_id = %doaj_id, "Linked article to registry record");
                        summary.linked.push(article.key.clone());
                    } else {
                        summary.already_linked.push(article.key.clone());
                    }
                }
                Err(RegistryError::ResultNotFound(_)) => match pusher {
                    Some(pusher) => match pusher.push_article(article).await {
                        Ok(Some(_)) => summary.pushed.push(article.key.clone()),
                        Ok(None) => summary.unmatched.push(article.key.clone()),
                        Err(e) => {
                            tracing::error!(article = %article.key, error = %e, "Push during sync failed");
                            summary.errors.push((article.key.clone(), e.to_string()));
                        }
                    },
                    None => {
                        tracing::info!(article = %article.key, doi = %doi, "No registry record for article");
                        summary.unmatched.push(article.key.clone());
                    }
                },
                Err(e) => {
                    tracing::error!(article = %article.key, error = %e, "Registry lookup failed");
                    summary.errors.push((article.key.clone(), e.to_string()));
                }
            }
        }

        tracing::info!(
            linked = summary.linked.len(),
            already_linked = summary.already_linked.len(),
            pushed = summary.pushed.len(),
            unmatched = summary.unmatched.len(),
            errors = summary.errors.len(),
            "Local-driven sync finished"
        );
        Ok(summary)
    }
}
