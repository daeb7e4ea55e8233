//! Deposit audit log and identifier link types
//!
//! A `DepositRecord` is written after every push or delete attempt against
//! the registry; rows are append-only and never mutated. An
//! `IdentifierLink` is the durable mapping from a local article to its
//! DOAJ id, created on first successful push and removed when the remote
//! record is deleted or found gone.

use crate::domain::ids::DoajId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier type under which DOAJ ids are linked to local articles
pub const DOAJ_ID_TYPE: &str = "doaj";

/// One audited push/delete attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositRecord {
    /// Local key of the article the attempt was for
    pub article_key: String,

    /// DOAJ id involved, if one was known at the time
    pub identifier: Option<String>,

    pub success: bool,

    /// Response body or an explanatory message
    pub result_text: String,

    pub timestamp: DateTime<Utc>,
}

impl DepositRecord {
    pub fn new(
        article_key: impl Into<String>,
        identifier: Option<&DoajId>,
        success: bool,
        result_text: impl Into<String>,
    ) -> Self {
        Self {
            article_key: article_key.into(),
            identifier: identifier.map(|id| id.as_str().to_string()),
            success,
            result_text: result_text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Durable local-article-to-DOAJ-id mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierLink {
    pub article_key: String,

    /// Always [`DOAJ_ID_TYPE`]
    pub id_type: String,

    pub identifier: DoajId,
}

impl IdentifierLink {
    pub fn new(article_key: impl Into<String>, identifier: DoajId) -> Self {
        Self {
            article_key: article_key.into(),
            id_type: DOAJ_ID_TYPE.to_string(),
            identifier,
        }
    }
}
