//! Synchronization core: transforms, push orchestration and reconciliation

pub mod push;
pub mod sync;
pub mod transform;

pub use push::{PushOptions, PushSummary, Pusher};
pub use sync::{SyncSummary, Syncer};
