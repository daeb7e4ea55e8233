//! DOAJ API adapters: HTTP core, wire records and domain clients

pub mod article_client;
pub mod http;
pub mod records;
pub mod search;

pub use article_client::{build_record, ArticleClient};
pub use http::{EndpointConfig, HttpCore, RawResponse, Verb};
pub use search::{SearchClient, SearchPager};
