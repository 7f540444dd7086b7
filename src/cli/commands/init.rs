//! Init command implementation
//!
//! Implements the `init` command for generating a sample configuration
//! file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ontex.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ontex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set ONTEX_GRAPHSTORE_PASSWORD in your environment or .env file");
                println!("  3. Validate configuration: ontex validate-config");
                println!("  4. Run an export: ontex export --project <id>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate sample configuration
    fn generate_config() -> String {
        r#"# ontex Configuration File
# Ontology export and graph import tool

[application]
name = "ontex"
log_level = "info"

[registry]
# Root directory of the project registry
root = "/var/lib/ontex/registry"

[storage]
# Directory holding generated export artifacts
cache_dir = "/var/cache/ontex"

[graphstore]
base_url = "http://localhost:7474"
database = "neo4j"
username = "neo4j"
password = "${ONTEX_GRAPHSTORE_PASSWORD}"
timeout_seconds = 60
# Base URL under which export artifacts are reachable for the store
fetch_base_url = "http://exports.internal"

[export]
generation_workers = 4
generation_queue = 16
transfer_workers = 2
transfer_queue = 8
lock_stripes = 10
# module_root = "http://example.org/onto#Root"

[logging]
local_enabled = true
local_path = "/var/log/ontex"
local_rotation = "daily"
"#
        .to_string()
    }
}
