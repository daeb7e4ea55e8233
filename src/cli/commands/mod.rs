//! CLI command implementations

pub mod delete;
pub mod init;
pub mod push;
pub mod sync;
pub mod validate;

use crate::adapters::doaj::HttpCore;
use crate::adapters::store::MemoryStore;
use crate::config::DoajSyncConfig;
use crate::core::PushOptions;
use std::sync::Arc;

/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code when some items failed
pub const EXIT_PARTIAL_FAILURE: i32 = 3;

/// Build the HTTP core and the article store shared by the commands
fn build_runtime(
    config: &DoajSyncConfig,
    articles_path: &str,
) -> anyhow::Result<(Arc<HttpCore>, Arc<MemoryStore>)> {
    let http = Arc::new(HttpCore::new(&config.doaj)?);
    let store = Arc::new(MemoryStore::from_json_file(articles_path)?);
    Ok((http, store))
}

fn push_options(config: &DoajSyncConfig, dry_run_flag: bool) -> PushOptions {
    PushOptions {
        push_enabled: config.doaj.push_enabled,
        dry_run: dry_run_flag || config.application.dry_run,
        recreate_on_immutable_change: config.doaj.recreate_on_immutable_change,
    }
}
