//! Validate config command implementation
//!
//! Implements the `validate-config` command.

use crate::cli::commands::EXIT_CONFIG_ERROR;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Dry Run: {}", config.application.dry_run);
                println!("  DOAJ API: {}", config.doaj.base_url);
                println!("  API Version: {}", config.doaj.api_version);
                println!("  Page Size: {}", config.doaj.page_size);
                println!("  Throttle: {}ms", config.doaj.throttle_ms);
                println!("  Push Enabled: {}", config.doaj.push_enabled);
                println!(
                    "  Retry: {} attempts, {}ms backoff",
                    config.doaj.retry.max_attempts, config.doaj.retry.backoff_ms
                );
                println!("  File Logging: {}", config.logging.file_enabled);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                Ok(EXIT_CONFIG_ERROR)
            }
        }
    }
}
