//! DOAJ wire records
//!
//! Fixed-shape structs mirroring the registry's JSON representation of an
//! article, plus the search and create response envelopes. Record
//! metadata assigned by the registry (`id`, `created_date`, `last_updated`
//! and the restricted admin fields) is load-only: decoded from responses
//! but never serialized back. Recognized optional fields serialize as
//! `null` rather than being omitted; unknown response fields are ignored.

use crate::domain::errors::RegistryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier type for the journal's electronic ISSN
pub const IDENT_EISSN: &str = "eissn";
/// Identifier type for the article DOI
pub const IDENT_DOI: &str = "doi";
/// The only link type DOAJ accepts for article links
pub const LINK_FULLTEXT: &str = "fulltext";

/// One article record as exchanged with `/articles/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub admin: Admin,
    pub bibjson: Bibjson,

    /// Registry-assigned id; absent until first successful create
    #[serde(skip_serializing, default)]
    pub id: Option<String>,

    #[serde(skip_serializing, default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing, default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    /// Serializes the record to the registry's JSON shape
    ///
    /// Only `admin` and `bibjson` are emitted; load-only fields are
    /// dropped and recognized nulls are preserved.
    pub fn encode(&self) -> Result<String, RegistryError> {
        serde_json::to_string(self).map_err(|e| RegistryError::Decode(e.to_string()))
    }

    /// Decodes a registry response body into a record
    pub fn decode(body: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(body).map_err(|e| RegistryError::Decode(e.to_string()))
    }
}

/// Admin sub-structure; only `publisher_record_id` is ours to write
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(skip_serializing, default)]
    pub in_doaj: bool,

    pub publisher_record_id: Option<String>,

    #[serde(skip_serializing, default)]
    pub upload_id: Option<String>,

    #[serde(skip_serializing, default)]
    pub seal: bool,
}

/// Bibliographic payload of an article record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bibjson {
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    pub title: Option<String>,

    /// Publication year, string-encoded per the DOAJ schema
    pub year: Option<String>,

    /// Publication month, string-encoded without zero padding
    pub month: Option<String>,

    #[serde(default)]
    pub identifier: Vec<Identifier>,

    pub journal: Option<Journal>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub link: Vec<Link>,

    #[serde(default)]
    pub author: Vec<Author>,

    pub subject: Option<Vec<Subject>>,

    pub start_page: Option<String>,
    pub end_page: Option<String>,
}

impl Bibjson {
    /// The value of the first identifier of the given type, if present
    pub fn identifier_of_type(&self, kind: &str) -> Option<&str> {
        self.identifier
            .iter()
            .find(|ident| ident.kind == kind)
            .and_then(|ident| ident.id.as_deref())
    }
}

/// Typed identifier entry (eissn, doi, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: String,

    pub id: Option<String>,
}

/// Journal block nested in bibjson
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub language: Vec<String>,

    #[serde(default)]
    pub license: Vec<License>,

    pub number: Option<String>,
    pub volume: Option<String>,
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub start_page: Option<String>,
    pub end_page: Option<String>,
    pub country: Option<String>,
    pub issns: Option<Vec<String>>,
}

/// License entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub open_access: bool,
    pub title: Option<String>,
    pub url: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Fulltext link; at most one text/html and one application/pdf entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub content_type: Option<String>,

    #[serde(rename = "type")]
    pub kind: String,

    pub url: Option<String>,
}

/// Author entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
    pub affiliation: Option<String>,
    pub orcid_id: Option<String>,
}

/// Subject classification entry (decode only; never emitted locally)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub code: Option<String>,
    pub scheme: Option<String>,
    pub term: Option<String>,
}

/// Body of a successful POST to `/articles`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponse {
    pub id: String,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

/// Envelope of a `/search/{type}/{query}` response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub previous: Option<String>,

    #[serde(default)]
    pub first: Option<String>,

    #[serde(default)]
    pub last: Option<String>,

    pub total: u64,
    pub page: u64,

    #[serde(rename = "pageSize")]
    pub page_size: u64,
}

impl SearchResponse {
    pub fn decode(body: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(body).map_err(|e| RegistryError::Decode(e.to_string()))
    }

    /// Whether another page of results qualifies for fetching
    pub fn has_more(&self) -> bool {
        self.next.is_some() && self.page * self.page_size < self.total
    }
}

/// The registry's view of one matched article
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: String,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub admin: Option<Admin>,

    #[serde(default)]
    pub bibjson: Option<Bibjson>,
}

impl SearchResult {
    /// DOI of the matched record, read from the bibjson identifiers
    pub fn doi(&self) -> Option<&str> {
        self.bibjson.as_ref()?.identifier_of_type(IDENT_DOI)
    }

    /// Whether the record is currently listed in DOAJ
    pub fn in_doaj(&self) -> bool {
        self.admin.as_ref().map(|a| a.in_doaj).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArticleRecord {
        ArticleRecord {
            admin: Admin::default(),
            bibjson: Bibjson {
                abstract_text: Some("The test abstract".to_string()),
                title: Some("The art of writing test titles".to_string()),
                year: Some("2019".to_string()),
                month: Some("7".to_string()),
                identifier: vec![Identifier {
                    kind: IDENT_EISSN.to_string(),
                    id: Some("0000-0000".to_string()),
                }],
                journal: Some(Journal {
                    language: vec!["en".to_string()],
                    title: Some("Journal One".to_string()),
                    ..Default::default()
                }),
                keywords: vec![],
                link: vec![],
                author: vec![],
                subject: None,
                start_page: None,
                end_page: None,
            },
            id: None,
            created_date: None,
            last_updated: None,
        }
    }

    #[test]
    fn test_encode_drops_load_only_fields() {
        let mut rec = record();
        rec.id = Some("abc".to_string());
        rec.admin.in_doaj = true;
        rec.admin.upload_id = Some("upload".to_string());

        let value: serde_json::Value = serde_json::from_str(&rec.encode().unwrap()).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("created_date").is_none());
        assert!(value["admin"].get("in_doaj").is_none());
        assert!(value["admin"].get("upload_id").is_none());
        assert!(value["admin"].get("publisher_record_id").is_some());
    }

    #[test]
    fn test_encode_preserves_nulls() {
        let value: serde_json::Value =
            serde_json::from_str(&record().encode().unwrap()).unwrap();
        assert!(value["bibjson"]["start_page"].is_null());
        assert!(value["bibjson"]["subject"].is_null());
        assert_eq!(value["admin"]["publisher_record_id"], serde_json::Value::Null);
    }

    #[test]
    fn test_round_trip_equality() {
        let rec = record();
        let decoded = ArticleRecord::decode(&rec.encode().unwrap()).unwrap();
        assert_eq!(rec, decoded);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let body = r#"{
            "admin": {"publisher_record_id": null, "application_status": "x"},
            "bibjson": {"title": "T", "es_type": "article"},
            "id": "abc123",
            "unknown_envelope_field": 1
        }"#;
        let rec = ArticleRecord::decode(body).unwrap();
        assert_eq!(rec.id.as_deref(), Some("abc123"));
        assert_eq!(rec.bibjson.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_decode_load_only_fields() {
        let body = r#"{
            "admin": {"in_doaj": true, "seal": false, "publisher_record_id": "7"},
            "bibjson": {},
            "id": "abc123",
            "created_date": "2016-10-31T15:38:29Z",
            "last_updated": "2019-02-21T14:22:52Z"
        }"#;
        let rec = ArticleRecord::decode(body).unwrap();
        assert!(rec.admin.in_doaj);
        assert!(rec.created_date.is_some());
        assert!(rec.last_updated.is_some());
    }

    #[test]
    fn test_decode_error_is_typed() {
        let err = ArticleRecord::decode("<html>not json</html>").unwrap_err();
        assert!(matches!(err, RegistryError::Decode(_)));
    }

    #[test]
    fn test_search_result_doi() {
        let body = r#"{
            "id": "mock_id",
            "last_updated": "2019-02-21T14:22:52Z",
            "created_date": "2016-10-31T15:38:29Z",
            "admin": {"in_doaj": true},
            "bibjson": {
                "identifier": [
                    {"type": "doi", "id": "10.0001/mock.01"},
                    {"type": "eissn", "id": "0000-0000"}
                ]
            }
        }"#;
        let result: SearchResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.doi(), Some("10.0001/mock.01"));
        assert!(result.in_doaj());
    }

    #[test]
    fn test_search_response_has_more() {
        let body = r#"{
            "results": [],
            "next": "https://doaj.org/api/v2/search/articles/x?page=2",
            "total": 120,
            "page": 1,
            "pageSize": 50
        }"#;
        let page = SearchResponse::decode(body).unwrap();
        assert!(page.has_more());

        let last = SearchResponse {
            next: None,
            page: 3,
            ..page
        };
        assert!(!last.has_more());
    }

    #[test]
    fn test_search_response_page_boundary() {
        let page = SearchResponse {
            results: vec![],
            next: Some("url".to_string()),
            previous: None,
            first: None,
            last: None,
            total: 100,
            page: 2,
            page_size: 50,
        };
        // page * pageSize == total: everything already fetched
        assert!(!page.has_more());
    }
}
