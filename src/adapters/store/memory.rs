//! In-memory article store
//!
//! Backs the CLI (articles loaded from a JSON file) and the integration
//! tests. Links and deposits live behind a single mutex; access patterns
//! are strictly sequential so contention is not a concern.

use crate::adapters::store::traits::ArticleStore;
use crate::domain::{
    Article, DepositRecord, DoajId, Doi, DoajSyncError, IdentifierLink, Result,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    articles: Vec<Article>,
    links: HashMap<String, IdentifierLink>,
    deposits: Vec<DepositRecord>,
}

/// In-memory [`ArticleStore`] implementation
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                articles,
                ..Default::default()
            }),
        }
    }

    /// Load articles from a JSON file containing an array of [`Article`]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DoajSyncError::Store(format!("Failed to read article file {}: {}", path.display(), e))
        })?;
        let articles: Vec<Article> = serde_json::from_str(&contents).map_err(|e| {
            DoajSyncError::Store(format!("Failed to parse article file {}: {}", path.display(), e))
        })?;
        Ok(Self::new(articles))
    }

    /// Seed a link directly (test setup and host-platform imports)
    pub async fn insert_link(&self, link: IdentifierLink) {
        let mut inner = self.inner.lock().await;
        inner.links.insert(link.article_key.clone(), link);
    }

    /// Snapshot of the deposit audit log
    pub async fn deposits(&self) -> Vec<DepositRecord> {
        self.inner.lock().await.deposits.clone()
    }

    /// Snapshot of all links
    pub async fn links(&self) -> Vec<IdentifierLink> {
        self.inner.lock().await.links.values().cloned().collect()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn find_article_by_doi(&self, doi: &Doi) -> Result<Option<Article>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .articles
            .iter()
            .find(|a| a.doi.as_ref() == Some(doi))
            .cloned())
    }

    async fn published_articles(&self) -> Result<Vec<Article>> {
        let inner = self.inner.lock().await;
        Ok(inner.articles.iter().filter(|a| a.published).cloned().collect())
    }

    async fn registry_link(&self, article_key: &str) -> Result<Option<IdentifierLink>> {
        let inner = self.inner.lock().await;
        Ok(inner.links.get(article_key).cloned())
    }

    async fn ensure_registry_link(
        &self,
        article_key: &str,
        doaj_id: &DoajId,
    ) -> Result<(IdentifierLink, bool)> {
        let mut inner = self.inner.lock().await;
        if let Some(existing) = inner.links.get(article_key) {
            return Ok((existing.clone(), false));
        }
        let link = IdentifierLink::new(article_key, doaj_id.clone());
        inner.links.insert(article_key.to_string(), link.clone());
        Ok((link, true))
    }

    async fn remove_registry_link(&self, article_key: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.links.remove(article_key);
        Ok(())
    }

    async fn record_deposit(&self, deposit: DepositRecord) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.deposits.push(deposit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::JournalMeta;

    fn article(key: &str, doi: Option<&str>) -> Article {
        Article {
            key: key.to_string(),
            title: "Title".to_string(),
            abstract_text: None,
            date_published: Some(chrono::Utc::now()),
            published: true,
            authors: vec![],
            keywords: vec![],
            url: None,
            pdf_url: None,
            doi: doi.map(|d| Doi::new(d).unwrap()),
            journal: JournalMeta {
                title: "J".to_string(),
                publisher: None,
                issn: None,
                language: "en".to_string(),
            },
            issue: None,
            license: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_doi() {
        let store = MemoryStore::new(vec![article("1", Some("10.1234/a.1"))]);
        let doi = Doi::new("10.1234/a.1").unwrap();
        assert!(store.find_article_by_doi(&doi).await.unwrap().is_some());
        let other = Doi::new("10.1234/a.2").unwrap();
        assert!(store.find_article_by_doi(&other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ensure_link_is_idempotent() {
        let store = MemoryStore::default();
        let id = DoajId::new("abc").unwrap();
        let (_, created) = store.ensure_registry_link("1", &id).await.unwrap();
        assert!(created);
        let (link, created) = store.ensure_registry_link("1", &id).await.unwrap();
        assert!(!created);
        assert_eq!(link.identifier, id);
        assert_eq!(store.links().await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_link() {
        let store = MemoryStore::default();
        let id = DoajId::new("abc").unwrap();
        store.ensure_registry_link("1", &id).await.unwrap();
        store.remove_registry_link("1").await.unwrap();
        assert!(store.registry_link("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deposit_log_is_append_only() {
        let store = MemoryStore::default();
        store
            .record_deposit(DepositRecord::new("1", None, true, "created"))
            .await
            .unwrap();
        store
            .record_deposit(DepositRecord::new("1", None, false, "404"))
            .await
            .unwrap();
        let deposits = store.deposits().await;
        assert_eq!(deposits.len(), 2);
        assert!(deposits[0].success);
        assert!(!deposits[1].success);
    }
}
