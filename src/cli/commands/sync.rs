//! Sync command implementation
//!
//! Reconciles local articles with DOAJ records, either registry-driven
//! (walk the registry's records for a journal ISSN) or local-driven
//! (look up every published local article by DOI).

use crate::cli::commands::{build_runtime, push_options, EXIT_CONFIG_ERROR, EXIT_PARTIAL_FAILURE};
use crate::config::load_config;
use crate::core::{Pusher, SyncSummary, Syncer};
use crate::domain::Issn;
use clap::Args;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to a JSON file containing the local articles
    #[arg(long)]
    pub articles: String,

    /// Registry-driven sync: walk DOAJ's records for this journal ISSN
    #[arg(long, conflicts_with = "push")]
    pub issn: Option<String>,

    /// Local-driven sync only: push articles DOAJ does not know yet
    #[arg(long)]
    pub push: bool,

    /// Dry run mode for pushes triggered by --push
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(articles = %self.articles, "Starting sync command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let (http, store) = build_runtime(&config, &self.articles)?;
        let syncer = Syncer::new(http.clone(), store.clone());

        let summary = match &self.issn {
            Some(raw_issn) => {
                let issn = match Issn::new(raw_issn.clone()) {
                    Ok(issn) => issn,
                    Err(e) => {
                        eprintln!("Invalid ISSN: {e}");
                        return Ok(EXIT_CONFIG_ERROR);
                    }
                };
                println!("🔄 Syncing from DOAJ records for ISSN {issn}...");
                syncer.sync_from_registry(&issn).await?
            }
            None => {
                println!("🔄 Syncing local articles against DOAJ...");
                let pusher = self.push.then(|| {
                    Pusher::new(http, store.clone(), push_options(&config, self.dry_run))
                });
                syncer.sync_from_local(pusher.as_ref()).await?
            }
        };

        print_summary(&summary);
        if summary.is_clean() {
            Ok(0)
        } else {
            Ok(EXIT_PARTIAL_FAILURE)
        }
    }
}

fn print_summary(summary: &SyncSummary) {
    println!();
    println!("Sync summary:");
    println!("  Newly linked:   {}", summary.linked.len());
    println!("  Already linked: {}", summary.already_linked.len());
    println!("  Pushed:         {}", summary.pushed.len());
    println!("  Unmatched:      {}", summary.unmatched.len());
    println!("  Errors:         {}", summary.errors.len());
    for (item, error) in &summary.errors {
        println!("    {item}: {error}");
    }
}
