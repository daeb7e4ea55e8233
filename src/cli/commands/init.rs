//! Init command implementation
//!
//! Implements the `init` command for generating a sample configuration
//! file.

use crate::cli::commands::EXIT_CONFIG_ERROR;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "doajsync.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing doajsync configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set DOAJSYNC_API_TOKEN in your environment or .env file");
                println!("  3. Validate configuration: doajsync validate-config");
                println!("  4. Push articles: doajsync push --articles articles.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn sample_config() -> &'static str {
        r#"# doajsync configuration file
# DOAJ article metadata synchronization tool

[application]
log_level = "info"
dry_run = false

[doaj]
base_url = "https://doaj.org/api"
api_version = "v2"
api_token = "${DOAJSYNC_API_TOKEN}"
connect_timeout_seconds = 5
timeout_seconds = 10
page_size = 50
throttle_ms = 250
push_enabled = true
recreate_on_immutable_change = false

[doaj.retry]
max_attempts = 3
backoff_ms = 200

[logging]
file_enabled = false
file_path = "logs"
file_rotation = "daily"
"#
    }
}
