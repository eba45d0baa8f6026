//! The `gpacalc init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gpacalc.toml").exists() {
        println!("gpacalc.toml already exists, skipping.");
    } else {
        std::fs::write("gpacalc.toml", SAMPLE_CONFIG)?;
        println!("Created gpacalc.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gpacalc.toml to choose where your record is stored");
    println!("  2. Run: gpacalc add-course --semester 1 --name \"Calculus I\" --credit 3 --grade A");
    println!("  3. Run: gpacalc show");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gpacalc configuration

# Where the record is kept. ${VAR} references are expanded.
data_file = "gpacalc-data.json"

# Credit given to a newly added course.
default_credit = 3.0
"#;
