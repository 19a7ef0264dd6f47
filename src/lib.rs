//! Playground Export
//!
//! Turns a Flow playground project into a runnable `flow-js-testing` test
//! scaffold:
//!
//! - **Templating**: marker substitution over fixed JavaScript skeletons
//!   ([`template`], [`skeletons`], [`fragments`], [`assemble`])
//! - **Formatting**: deterministic layout of the generated code, or an
//!   external formatter such as prettier ([`formatter`])
//! - **Bundling**: the export's file set with an explicit collision policy
//!   ([`bundle`]) and the writers that materialize it ([`writer`])
//! - **Orchestration**: [`exporter::ProjectExporter`] drives one export end
//!   to end; [`config`] resolves its settings
//!
//! Fact extraction, account resolution and scaffold transport live in the
//! `playground-extractor`, `playground-resolver` and `playground-transport`
//! workspace crates.
//!
//! # Example
//!
//! ```ignore
//! use playground_export::config::ExportConfig;
//! use playground_export::exporter::ProjectExporter;
//! use playground_export::writer::DirectoryPackageWriter;
//!
//! let config = ExportConfig::from_env();
//! let exporter = ProjectExporter::from_config(&config);
//! let mut writer = DirectoryPackageWriter::new("./export");
//! exporter.export(&project, &mut writer).await?;
//! ```

pub mod assemble;
pub mod bundle;
pub mod config;
pub mod exporter;
pub mod formatter;
pub mod fragments;
pub mod skeletons;
pub mod template;
pub mod writer;

pub use bundle::{CollisionPolicy, ExportBundle};
pub use config::ExportConfig;
pub use exporter::{ExportError, ExportOptions, ProjectExporter};
pub use playground_types::Project;
