use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use playground_export::ProjectExporter;

use super::{load_project, GenerationArgs};

#[derive(Parser, Debug)]
pub struct RenderCmd {
    /// Project snapshot JSON (id, accounts, transactionTemplates, scriptTemplates)
    #[arg(long)]
    project: PathBuf,

    #[command(flatten)]
    generation: GenerationArgs,
}

impl RenderCmd {
    pub async fn execute(&self) -> Result<()> {
        let project = load_project(&self.project)?;
        let config = self.generation.config();

        // Scaffold files are never fetched for the test file alone.
        let exporter = ProjectExporter::from_config(&config);
        let test_file = exporter.render_test_file(&project).await?;
        print!("{}", test_file);
        Ok(())
    }
}
