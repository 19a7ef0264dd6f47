//! CLI subcommand implementations for playground-export

pub mod export;
pub mod inspect;
pub mod output;
pub mod render;

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

use playground_export::bundle::CollisionPolicy;
use playground_export::config::{ExportConfig, FormatterKind};
use playground_export::Project;

/// Settings shared by every command that generates tests.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// Code formatter for the generated JavaScript
    #[arg(long, value_enum)]
    pub formatter: Option<FormatterKind>,

    /// What to do when two entities map to the same file
    #[arg(long, value_enum)]
    pub collision: Option<CollisionPolicy>,
}

impl GenerationArgs {
    /// Environment-derived config with these flags applied on top.
    pub fn config(&self) -> ExportConfig {
        let mut config = ExportConfig::from_env();
        if let Some(formatter) = self.formatter {
            config.formatter = formatter;
        }
        if let Some(policy) = self.collision {
            config.collision_policy = policy;
        }
        config
    }
}

pub fn load_project(path: &Path) -> Result<Project> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file {}", path.display()))?;
    Project::from_json(&json)
        .with_context(|| format!("Failed to parse project file {}", path.display()))
}
