//! Delete command implementation
//!
//! Deletes one article's DOAJ record and removes the local link.

use crate::cli::commands::{build_runtime, push_options, EXIT_CONFIG_ERROR};
use crate::config::load_config;
use crate::core::Pusher;
use crate::domain::{DoajId, IdentifierLink};
use clap::Args;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Path to a JSON file containing the local articles
    #[arg(long)]
    pub articles: String,

    /// Key of the article whose DOAJ record should be deleted
    #[arg(long)]
    pub key: String,

    /// DOAJ id of the record, when no stored link exists for the article
    #[arg(long)]
    pub doaj_id: Option<String>,

    /// Dry run mode - log the delete without sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(article = %self.key, "Starting delete command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let (http, store) = build_runtime(&config, &self.articles)?;

        if let Some(raw_id) = &self.doaj_id {
            let doaj_id = match DoajId::new(raw_id.clone()) {
                Ok(id) => id,
                Err(e) => {
                    eprintln!("Invalid DOAJ id: {e}");
                    return Ok(EXIT_CONFIG_ERROR);
                }
            };
            store
                .insert_link(IdentifierLink::new(&self.key, doaj_id))
                .await;
        }

        let pusher = Pusher::new(http, store.clone(), push_options(&config, self.dry_run));
        pusher.delete_article(&self.key).await?;

        if self.dry_run {
            println!("🔍 DRY RUN - delete for article '{}' not sent", self.key);
        } else {
            println!("✅ Deleted DOAJ record for article '{}'", self.key);
        }
        Ok(0)
    }
}
