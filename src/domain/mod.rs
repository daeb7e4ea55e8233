//! Core domain types
//!
//! Local article model, registry identifiers, deposit audit types and the
//! error hierarchy shared across the crate.

pub mod article;
pub mod deposit;
pub mod errors;
pub mod ids;
pub mod result;

pub use article::{Article, ArticleAuthor, IssueMeta, JournalMeta, LicenseMeta};
pub use deposit::{DepositRecord, IdentifierLink, DOAJ_ID_TYPE};
pub use errors::{DoajSyncError, RegistryError};
pub use ids::{DoajId, Doi, Issn};
pub use result::Result;
