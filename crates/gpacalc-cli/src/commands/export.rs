//! The `gpacalc export` command.

use std::path::PathBuf;

use anyhow::Result;

use gpacalc_core::report::{save_json, save_markdown};

use super::Context;

pub fn execute(ctx: &Context, output: Option<PathBuf>) -> Result<()> {
    let (_config, store, _tracker) = ctx.open()?;
    let as_json = match ctx.format.as_str() {
        "json" => true,
        "text" | "markdown" | "md" => false,
        other => anyhow::bail!("unknown export format: {other} (expected markdown or json)"),
    };

    let path = output.unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y-%m-%dT%H%M%S");
        let ext = if as_json { "json" } else { "md" };
        PathBuf::from(format!("transcript-{timestamp}.{ext}"))
    });

    if as_json {
        save_json(store.record(), &path)?;
    } else {
        save_markdown(store.record(), &path)?;
    }
    eprintln!("Transcript written to: {}", path.display());

    Ok(())
}
