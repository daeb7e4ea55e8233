//! Article lifecycle client
//!
//! Maps one local article to one DOAJ record and manages that record's
//! lifecycle: create/update (upsert), load by remote id, delete. Every
//! remote attempt for a known local article is audited with exactly one
//! deposit row, and the identifier link is kept consistent with what the
//! registry reports (created on first push, removed when the remote
//! record is gone).
//!
//! A client instance is built fresh for each operation and discarded
//! afterwards; durable state lives in the store, not here.

use crate::adapters::doaj::http::{HttpCore, RawResponse, Verb, ARTICLES_ENDPOINT};
use crate::adapters::doaj::records::{
    Admin, ArticleRecord, Author, Bibjson, CreateResponse, Identifier, Journal, License, Link,
    IDENT_DOI, IDENT_EISSN, LINK_FULLTEXT,
};
use crate::adapters::store::ArticleStore;
use crate::core::transform::{month_string, strip_tags, year_string};
use crate::domain::{Article, DepositRecord, DoajId, DoajSyncError, RegistryError, Result};
use std::sync::Arc;

/// DOAJ rejects articles with more than six keywords
const MAX_KEYWORDS: usize = 6;

/// Client for one article's registry record
pub struct ArticleClient {
    http: Arc<HttpCore>,
    store: Arc<dyn ArticleStore>,
    record: ArticleRecord,
    article_key: Option<String>,
    recreate_on_immutable_change: bool,
}

impl std::fmt::Debug for ArticleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleClient")
            .field("record", &self.record)
            .field("article_key", &self.article_key)
            .field("recreate_on_immutable_change", &self.recreate_on_immutable_change)
            .finish_non_exhaustive()
    }
}

impl ArticleClient {
    /// Build a client from a local article
    ///
    /// Pure transform plus the caller-supplied known remote id; performs
    /// no I/O. Fails with a validation error if the journal has no ISSN
    /// or the article has no publication date.
    pub fn from_article(
        http: Arc<HttpCore>,
        store: Arc<dyn ArticleStore>,
        article: &Article,
        known_id: Option<DoajId>,
        recreate_on_immutable_change: bool,
    ) -> Result<Self> {
        let mut record = build_record(article)?;
        record.id = known_id.map(DoajId::into_inner);
        Ok(Self {
            http,
            store,
            record,
            article_key: Some(article.key.clone()),
            recreate_on_immutable_change,
        })
    }

    /// Build a client for a record whose remote id is already known,
    /// without fetching or transforming anything
    ///
    /// Used for deletes, where the bibliographic payload is irrelevant.
    pub fn for_known_record(
        http: Arc<HttpCore>,
        store: Arc<dyn ArticleStore>,
        article_key: &str,
        id: DoajId,
    ) -> Self {
        Self {
            http,
            store,
            record: ArticleRecord {
                id: Some(id.into_inner()),
                ..Default::default()
            },
            article_key: Some(article_key.to_string()),
            recreate_on_immutable_change: false,
        }
    }

    /// Build a client for an existing remote record and load its fields
    pub async fn from_remote_id(
        http: Arc<HttpCore>,
        store: Arc<dyn ArticleStore>,
        id: &DoajId,
    ) -> Result<Self> {
        let mut client = Self {
            http,
            store,
            record: ArticleRecord {
                id: Some(id.as_str().to_string()),
                ..Default::default()
            },
            article_key: None,
            recreate_on_immutable_change: false,
        };
        client.load().await?;
        Ok(client)
    }

    /// The record in its current state
    pub fn record(&self) -> &ArticleRecord {
        &self.record
    }

    /// The remote id, if the record has one
    pub fn doaj_id(&self) -> Option<&str> {
        self.record.id.as_deref()
    }

    /// Serialize the record to the registry's JSON shape
    pub fn encode(&self) -> Result<String> {
        Ok(self.record.encode()?)
    }

    /// Fetch the remote record and populate this client's fields
    async fn load(&mut self) -> Result<()> {
        let id = self
            .record
            .id
            .clone()
            .ok_or_else(|| DoajSyncError::Validation("cannot load a record without a DOAJ id".into()))?;

        let response = self
            .http
            .request(&ARTICLES_ENDPOINT, Verb::Get, &[("article_id", id.as_str())], &[], None)
            .await?;

        if !response.is_success() {
            return Err(self.handle_failure(response).await);
        }

        let mut record = ArticleRecord::decode(&response.body)?;
        if record.id.is_none() {
            record.id = Some(id);
        }
        self.record = record;
        Ok(())
    }

    /// Create or update the remote record
    ///
    /// PUT when a remote id is known, POST otherwise; the newly assigned
    /// id is captured from the create response. One deposit row is
    /// written per attempt and the identifier link is ensured on success.
    ///
    /// On a 403 immutable-field rejection with auto-recovery configured,
    /// the remote record is deleted and recreated once; the
    /// `ImmutableFieldChanged` error is returned regardless so the caller
    /// always learns about the rejection.
    pub async fn upsert(&mut self) -> Result<DoajId> {
        let result = self.upsert_once().await;

        if let Err(DoajSyncError::Registry(RegistryError::ImmutableFieldChanged(id))) = &result {
            if self.recreate_on_immutable_change {
                let rejected_id = id.clone();
                tracing::warn!(
                    doaj_id = %rejected_id,
                    "Immutable field changed, deleting remote record and recreating"
                );
                self.delete().await?;
                self.upsert_once().await?;
                return Err(RegistryError::ImmutableFieldChanged(rejected_id).into());
            }
        }

        result
    }

    async fn upsert_once(&mut self) -> Result<DoajId> {
        let body = self.record.encode()?;

        match self.record.id.clone() {
            Some(id) => {
                let response = self
                    .http
                    .request(
                        &ARTICLES_ENDPOINT,
                        Verb::Put,
                        &[("article_id", id.as_str())],
                        &[],
                        Some(&body),
                    )
                    .await?;
                if !response.is_success() {
                    return Err(self.handle_failure(response).await);
                }

                let doaj_id = DoajId::new(id).map_err(DoajSyncError::Validation)?;
                self.log_deposit(Some(&doaj_id), true, &response.body).await;
                self.ensure_link(&doaj_id).await?;
                Ok(doaj_id)
            }
            None => {
                let response = self
                    .http
                    .request(
                        &ARTICLES_ENDPOINT,
                        Verb::Post,
                        &[("article_id", "")],
                        &[],
                        Some(&body),
                    )
                    .await?;
                if !response.is_success() {
                    return Err(self.handle_failure(response).await);
                }

                let created: CreateResponse = serde_json::from_str(&response.body)
                    .map_err(|e| RegistryError::Decode(e.to_string()))?;
                self.record.id = Some(created.id.clone());
                let doaj_id = DoajId::new(created.id).map_err(DoajSyncError::Validation)?;
                tracing::info!(doaj_id = %doaj_id, "Created DOAJ record");

                self.log_deposit(Some(&doaj_id), true, &response.body).await;
                self.ensure_link(&doaj_id).await?;
                Ok(doaj_id)
            }
        }
    }

    /// Delete the remote record
    ///
    /// Requires a known remote id; fails with a validation error (no
    /// network call) otherwise. On success the deposit is logged, the
    /// identifier link removed and the in-memory id cleared.
    pub async fn delete(&mut self) -> Result<()> {
        let id = self.record.id.clone().ok_or_else(|| {
            DoajSyncError::Validation("record has no DOAJ id, it can't be deleted".into())
        })?;

        let response = self
            .http
            .request(
                &ARTICLES_ENDPOINT,
                Verb::Delete,
                &[("article_id", id.as_str())],
                &[],
                None,
            )
            .await?;
        if !response.is_success() {
            return Err(self.handle_failure(response).await);
        }

        let doaj_id = DoajId::new(id).map_err(DoajSyncError::Validation)?;
        self.log_deposit(Some(&doaj_id), true, "DOAJ record deleted").await;
        if let Some(key) = self.article_key.clone() {
            self.store.remove_registry_link(&key).await?;
        }
        self.record.id = None;
        tracing::info!(doaj_id = %doaj_id, "Deleted DOAJ record");
        Ok(())
    }

    /// Map a non-2xx response to a typed error, applying the article
    /// endpoint's special cases before the default mapping
    async fn handle_failure(&mut self, response: RawResponse) -> DoajSyncError {
        match response.status {
            // The remote record no longer exists: drop the stale link and
            // forget the id so a later push creates a fresh record.
            404 if self.record.id.is_some() => {
                let stale = self.record.id.clone().unwrap_or_default();
                tracing::warn!(doaj_id = %stale, "DOAJ id returned 404, removing stale link");
                // Audit first so the deposit row still names the stale id.
                self.log_deposit(None, false, format!("DOAJ id {stale} results in 404"))
                    .await;
                if let Some(key) = self.article_key.clone() {
                    let _ = self.store.remove_registry_link(&key).await;
                }
                self.record.id = None;
                RegistryError::ResultNotFound(format!("DOAJ record {stale} no longer exists")).into()
            }
            // Undocumented, but DOAJ answers 403 when the article URL or
            // an identifier changed since creation.
            403 if self.record.id.is_some() => {
                let id = self.record.id.clone().unwrap_or_default();
                self.log_deposit(None, false, &response.body).await;
                RegistryError::ImmutableFieldChanged(id).into()
            }
            _ => {
                self.log_deposit(None, false, &response.body).await;
                self.http.default_error(&response).into()
            }
        }
    }

    async fn ensure_link(&self, doaj_id: &DoajId) -> Result<()> {
        if let Some(key) = &self.article_key {
            let (_, created) = self.store.ensure_registry_link(key, doaj_id).await?;
            if created {
                tracing::debug!(article = %key, doaj_id = %doaj_id, "Linked article to DOAJ record");
            }
        }
        Ok(())
    }

    async fn log_deposit(&self, id: Option<&DoajId>, success: bool, text: impl Into<String>) {
        let Some(key) = &self.article_key else {
            return;
        };
        let fallback_id = self.record.id.as_deref().and_then(|s| DoajId::new(s).ok());
        let identifier = id.cloned().or(fallback_id);
        let deposit = DepositRecord::new(key.clone(), identifier.as_ref(), success, text);
        if let Err(e) = self.store.record_deposit(deposit).await {
            tracing::error!(article = %key, error = %e, "Failed to write deposit record");
        }
    }
}

/// Pure transform of a local article to its registry record
///
/// Always emits exactly one eissn identifier; a doi identifier only when
/// the article has one. Links are independent: text/html when a canonical
/// URL exists, application/pdf when a PDF galley exists. Keywords are
/// capped at the registry's limit of six.
pub fn build_record(article: &Article) -> Result<ArticleRecord> {
    let issn = article.journal.issn.as_ref().ok_or_else(|| {
        DoajSyncError::Validation(format!(
            "journal '{}' has no ISSN, cannot build a DOAJ record",
            article.journal.title
        ))
    })?;
    let date = article.date_published.as_ref().ok_or_else(|| {
        DoajSyncError::Validation(format!("article {} has no publication date", article.key))
    })?;

    let license: Vec<License> = article
        .license
        .iter()
        .map(|l| License {
            open_access: true,
            title: Some(l.name.clone()),
            url: l.url.clone(),
            kind: None,
        })
        .collect();

    let mut link = Vec::new();
    if let Some(url) = &article.url {
        link.push(Link {
            content_type: Some("text/html".to_string()),
            kind: LINK_FULLTEXT.to_string(),
            url: Some(url.clone()),
        });
    }
    if let Some(pdf_url) = &article.pdf_url {
        link.push(Link {
            content_type: Some("application/pdf".to_string()),
            kind: LINK_FULLTEXT.to_string(),
            url: Some(pdf_url.clone()),
        });
    }

    let mut identifier = vec![Identifier {
        kind: IDENT_EISSN.to_string(),
        id: Some(issn.as_str().to_string()),
    }];
    if let Some(doi) = &article.doi {
        identifier.push(Identifier {
            kind: IDENT_DOI.to_string(),
            id: Some(doi.as_str().to_string()),
        });
    }

    let journal = Journal {
        language: vec![article.journal.language.clone()],
        license,
        number: article.issue.as_ref().map(|i| i.number.to_string()),
        volume: article.issue.as_ref().map(|i| i.volume.to_string()),
        title: Some(article.journal.title.clone()),
        publisher: article.journal.publisher.clone(),
        ..Default::default()
    };

    let author: Vec<Author> = article
        .authors
        .iter()
        .map(|a| Author {
            name: Some(a.name.clone()),
            affiliation: a.affiliation.clone(),
            orcid_id: a.orcid.as_ref().map(|o| format!("https://orcid.org/{o}")),
        })
        .collect();

    Ok(ArticleRecord {
        admin: Admin::default(),
        bibjson: Bibjson {
            abstract_text: article.abstract_text.as_deref().map(strip_tags),
            title: Some(strip_tags(&article.title)),
            year: Some(year_string(date)),
            month: Some(month_string(date)),
            identifier,
            journal: Some(journal),
            keywords: article.keywords.iter().take(MAX_KEYWORDS).cloned().collect(),
            link,
            author,
            subject: None,
            start_page: None,
            end_page: None,
        },
        id: None,
        created_date: None,
        last_updated: None,
    })
}
