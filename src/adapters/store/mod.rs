//! Local persistence adapters

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::ArticleStore;
