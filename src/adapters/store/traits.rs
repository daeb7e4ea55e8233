//! Local persistence abstraction
//!
//! The host publishing platform owns article storage, the deposit audit
//! log and the identifier links. This trait is the seam the sync core
//! talks through; the in-memory implementation in
//! [`super::memory`] backs the CLI and the tests.

use crate::domain::{Article, DepositRecord, DoajId, Doi, IdentifierLink, Result};
use async_trait::async_trait;

/// Local article source and audit sink
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Look up a local article by its DOI
    async fn find_article_by_doi(&self, doi: &Doi) -> Result<Option<Article>>;

    /// All articles in the published stage
    async fn published_articles(&self) -> Result<Vec<Article>>;

    /// The DOAJ link for an article, if one exists
    async fn registry_link(&self, article_key: &str) -> Result<Option<IdentifierLink>>;

    /// Get-or-create the DOAJ link for an article
    ///
    /// Idempotent: calling twice with the same pair never creates a
    /// duplicate. Returns the link and whether it was newly created.
    async fn ensure_registry_link(
        &self,
        article_key: &str,
        doaj_id: &DoajId,
    ) -> Result<(IdentifierLink, bool)>;

    /// Remove the DOAJ link for an article, if present
    async fn remove_registry_link(&self, article_key: &str) -> Result<()>;

    /// Append one row to the deposit audit log
    async fn record_deposit(&self, deposit: DepositRecord) -> Result<()>;
}
