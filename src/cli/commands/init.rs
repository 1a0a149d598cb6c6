//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::Path;

/// Sample configuration written by `init`
const SAMPLE_CONFIG: &str = r#"# mismo-anon configuration
# Every setting is optional; the values below are the defaults.
# Any value may reference an environment variable with ${VAR_NAME}.

[application]
log_level = "info"  # trace | debug | info | warn | error

[anonymization]
# Match rules and report counts without changing any value
dry_run = false

# Contact points with _Type="Email" receive the same 555 digit string as
# phones and faxes unless this is enabled, in which case they receive a
# userNNNN@example.com address.
realistic_emails = false

[anonymization.audit]
# One JSON line per document with HMAC-SHA256 digests of replaced values
enabled = false
log_path = "./audit/anonymization.log"
json_format = true
# Fixed key so digests correlate across runs; a random key is used per run
# when unset
# hash_key = "${MISMO_ANON_AUDIT_KEY}"

[batch]
output_subfolder = "anon"
max_parallel_files = 4
overwrite = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing mismo-anon configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: mismo-anon validate-config");
                println!("  3. Anonymize a folder: mismo-anon folder ./loans");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }
}
