//! Local article model
//!
//! The view of an article the host publishing platform must provide. The
//! sync core only reads these fields; how they are stored is the host's
//! concern (see [`crate::adapters::store::ArticleStore`]).

use crate::domain::ids::{Doi, Issn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A locally published article, as exposed by the host platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Host-side key for the article (primary key, slug, ...)
    pub key: String,

    /// Article title, may contain markup
    pub title: String,

    /// Abstract, may contain markup
    #[serde(default)]
    pub abstract_text: Option<String>,

    /// Publication date; articles without one are never pushed
    #[serde(default)]
    pub date_published: Option<DateTime<Utc>>,

    /// Whether the article has reached the published stage
    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub authors: Vec<ArticleAuthor>,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Canonical landing page URL, if the article has one
    #[serde(default)]
    pub url: Option<String>,

    /// URL of the PDF galley, if one exists
    #[serde(default)]
    pub pdf_url: Option<String>,

    #[serde(default)]
    pub doi: Option<Doi>,

    pub journal: JournalMeta,

    #[serde(default)]
    pub issue: Option<IssueMeta>,

    #[serde(default)]
    pub license: Option<LicenseMeta>,
}

impl Article {
    /// Whether this article is eligible for a registry push: published,
    /// dated and carrying a DOI
    pub fn can_push(&self) -> bool {
        self.published && self.date_published.is_some() && self.doi.is_some()
    }
}

/// Author display data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleAuthor {
    pub name: String,

    #[serde(default)]
    pub affiliation: Option<String>,

    /// Bare ORCID ("0000-0000-0000-0000"), expanded to a URL on push
    #[serde(default)]
    pub orcid: Option<String>,
}

/// Journal metadata for the article's journal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalMeta {
    pub title: String,

    #[serde(default)]
    pub publisher: Option<String>,

    /// Electronic ISSN; required for any push (DOAJ keys articles to it)
    #[serde(default)]
    pub issn: Option<Issn>,

    /// ISO 639-1 language code, e.g. "en"
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Volume/number of the issue the article appeared in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueMeta {
    pub volume: u32,
    pub number: u32,
}

/// License attached to the article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseMeta {
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article() -> Article {
        Article {
            key: "1".to_string(),
            title: "Title".to_string(),
            abstract_text: None,
            date_published: Some(Utc.with_ymd_and_hms(2019, 7, 1, 0, 0, 0).unwrap()),
            published: true,
            authors: vec![],
            keywords: vec![],
            url: None,
            pdf_url: None,
            doi: Some(Doi::new("10.1234/t.1").unwrap()),
            journal: JournalMeta {
                title: "Journal One".to_string(),
                publisher: None,
                issn: None,
                language: "en".to_string(),
            },
            issue: None,
            license: None,
        }
    }

    #[test]
    fn test_can_push() {
        assert!(article().can_push());
    }

    #[test]
    fn test_cannot_push_without_doi() {
        let mut a = article();
        a.doi = None;
        assert!(!a.can_push());
    }

    #[test]
    fn test_cannot_push_unpublished() {
        let mut a = article();
        a.published = false;
        assert!(!a.can_push());
        let mut b = article();
        b.date_published = None;
        assert!(!b.can_push());
    }
}
