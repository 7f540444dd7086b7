//! Validate config command implementation
//!
//! Implements the `validate-config` command for validating the ontex
//! configuration file.

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
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Registry Root: {}", config.registry.root);
        println!("  Cache Dir: {}", config.storage.cache_dir);
        println!("  Graph Store: {}", config.graphstore.base_url);
        println!("  Graph Database: {}", config.graphstore.database);
        println!("  Fetch Base URL: {}", config.graphstore.fetch_base_url);
        println!("  Generation Workers: {}", config.export.generation_workers);
        println!("  Transfer Workers: {}", config.export.transfer_workers);
        println!("  Lock Stripes: {}", config.export.lock_stripes);
        if let Some(root) = &config.export.module_root {
            println!("  Module Root: {root}");
        }
        println!();
        Ok(0)
    }
}
