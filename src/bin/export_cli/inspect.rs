use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use playground_extractor::SourceFacts;

use super::output::format_facts;

#[derive(Parser, Debug)]
pub struct InspectCmd {
    /// Cadence source file
    file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl InspectCmd {
    pub fn execute(&self) -> Result<()> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let facts = SourceFacts::scan(&text);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&facts).context("serialize source facts")?
            );
        } else {
            print!("{}", format_facts(&facts));
        }
        Ok(())
    }
}
