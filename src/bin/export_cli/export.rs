use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use playground_export::config::MissingPreparePolicy;
use playground_export::writer::{DirectoryPackageWriter, JsonPackageWriter, PackageWriter};
use playground_export::ProjectExporter;

use super::output::print_artifact;
use super::{load_project, GenerationArgs};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PackageFormat {
    /// Directory tree
    #[default]
    Dir,
    /// Single JSON document mapping paths to contents
    Json,
}

#[derive(Parser, Debug)]
pub struct ExportCmd {
    /// Project snapshot JSON (id, accounts, transactionTemplates, scriptTemplates)
    #[arg(long)]
    project: PathBuf,

    /// Output directory (or file, with --format json)
    #[arg(long)]
    out: PathBuf,

    /// Package format
    #[arg(long, value_enum, default_value_t = PackageFormat::Dir)]
    format: PackageFormat,

    /// Base URL of the remote scaffold files
    #[arg(long, conflicts_with = "scaffold_dir")]
    scaffold_url: Option<String>,

    /// Read scaffold files from a local directory instead
    #[arg(long)]
    scaffold_dir: Option<PathBuf>,

    /// Replace an existing output directory
    #[arg(long)]
    force: bool,

    /// Fail on transactions without a prepare() clause instead of assuming no signers
    #[arg(long)]
    strict_prepare: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    generation: GenerationArgs,
}

impl ExportCmd {
    pub async fn execute(&self) -> Result<()> {
        let project = load_project(&self.project)?;

        let mut config = self.generation.config();
        if let Some(url) = &self.scaffold_url {
            config.scaffold_base_url = playground_transport::resolve_scaffold_url(Some(url));
            config.scaffold_dir = None;
        }
        if let Some(dir) = &self.scaffold_dir {
            config.scaffold_dir = Some(dir.clone());
        }
        if self.strict_prepare {
            config.missing_prepare = MissingPreparePolicy::Fail;
        }

        let exporter = ProjectExporter::from_config(&config);
        let mut writer: Box<dyn PackageWriter> = match self.format {
            PackageFormat::Dir => {
                Box::new(DirectoryPackageWriter::new(&self.out).replace_existing(self.force))
            }
            PackageFormat::Json => Box::new(JsonPackageWriter::new(&self.out)),
        };

        let artifact = exporter.export(&project, writer.as_mut()).await?;
        print_artifact(&artifact, self.json)
    }
}
