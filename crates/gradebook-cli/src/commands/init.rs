//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradebook.toml to point at your records API");
    println!("  2. Run: gradebook list students");
    println!("  3. Run: gradebook add-student --id S001 --name \"Ada Lovelace\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

# Base URL of the records API. Can also be set via GRADEBOOK_API_URL.
api_url = "http://127.0.0.1:8000"

# HTTP request timeout in seconds.
timeout_secs = 30

# Directory report files are written to.
output_dir = "./gradebook-reports"
"#;
