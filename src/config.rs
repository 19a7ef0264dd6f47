//! Export configuration.
//!
//! Resolution order is defaults, then `PLAYGROUND_*` environment variables,
//! then whatever the caller (usually the CLI) overrides on the struct.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use playground_transport::{
    resolve_scaffold_url, DirectoryScaffoldSource, HttpScaffoldSource, ScaffoldSource,
};
use playground_types::env_utils::{env_nonempty, env_var, env_var_or};

use crate::bundle::CollisionPolicy;
use crate::formatter::{BuiltinFormatter, CodeFormatter, ExternalFormatter};

pub const SCAFFOLD_DIR_ENV: &str = "PLAYGROUND_SCAFFOLD_DIR";
pub const FETCH_TIMEOUT_ENV: &str = "PLAYGROUND_FETCH_TIMEOUT_SECS";
pub const FORMATTER_ENV: &str = "PLAYGROUND_FORMATTER";
pub const COLLISION_POLICY_ENV: &str = "PLAYGROUND_COLLISION_POLICY";

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// File name prettier uses to infer the parser.
const PRETTIER_FILE_NAME: &str = "index.test.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FormatterKind {
    #[default]
    Builtin,
    Prettier,
}

impl std::str::FromStr for FormatterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "prettier" => Ok(Self::Prettier),
            other => Err(format!("unknown formatter: {}", other)),
        }
    }
}

/// What a transaction without a `prepare(...)` clause means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPreparePolicy {
    /// Treat it as a transaction with no signers.
    #[default]
    ZeroSigners,
    /// Abort the export.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub scaffold_base_url: String,
    /// Read scaffold files from this directory instead of fetching them.
    pub scaffold_dir: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub formatter: FormatterKind,
    pub collision_policy: CollisionPolicy,
    pub missing_prepare: MissingPreparePolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scaffold_base_url: playground_transport::DEFAULT_SCAFFOLD_URL.to_string(),
            scaffold_dir: None,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            formatter: FormatterKind::default(),
            collision_policy: CollisionPolicy::default(),
            missing_prepare: MissingPreparePolicy::default(),
        }
    }
}

impl ExportConfig {
    /// Defaults overlaid with `PLAYGROUND_*` environment variables.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            scaffold_base_url: resolve_scaffold_url(None),
            scaffold_dir: env_nonempty(SCAFFOLD_DIR_ENV).map(PathBuf::from),
            fetch_timeout: Duration::from_secs(env_var_or(
                FETCH_TIMEOUT_ENV,
                DEFAULT_FETCH_TIMEOUT_SECS,
            )),
            formatter: env_var(FORMATTER_ENV).unwrap_or(defaults.formatter),
            collision_policy: env_var(COLLISION_POLICY_ENV).unwrap_or(defaults.collision_policy),
            missing_prepare: defaults.missing_prepare,
        }
    }

    /// Scaffold source: the local directory when one is configured, the
    /// remote base URL otherwise.
    pub fn scaffold_source(&self) -> Arc<dyn ScaffoldSource> {
        match &self.scaffold_dir {
            Some(dir) => Arc::new(DirectoryScaffoldSource::new(dir.clone())),
            None => Arc::new(HttpScaffoldSource::with_timeouts(
                &self.scaffold_base_url,
                self.fetch_timeout,
                Duration::from_secs(CONNECT_TIMEOUT_SECS),
            )),
        }
    }

    pub fn code_formatter(&self) -> Arc<dyn CodeFormatter> {
        match self.formatter {
            FormatterKind::Builtin => Arc::new(BuiltinFormatter),
            FormatterKind::Prettier => Arc::new(ExternalFormatter::prettier(PRETTIER_FILE_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert!(config.scaffold_base_url.ends_with("/v0.1.0"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.formatter, FormatterKind::Builtin);
        assert_eq!(config.collision_policy, CollisionPolicy::Overwrite);
        assert_eq!(config.missing_prepare, MissingPreparePolicy::ZeroSigners);
    }

    #[test]
    fn test_formatter_kind_parsing() {
        assert_eq!("Prettier".parse::<FormatterKind>(), Ok(FormatterKind::Prettier));
        assert!("black".parse::<FormatterKind>().is_err());
    }

    #[test]
    fn test_scaffold_source_selection() {
        let mut config = ExportConfig::default();
        assert!(config.scaffold_source().describe().starts_with("https://"));

        config.scaffold_dir = Some(PathBuf::from("/tmp/scaffold"));
        assert_eq!(config.scaffold_source().describe(), "/tmp/scaffold");
    }

    #[test]
    fn test_code_formatter_selection() {
        let mut config = ExportConfig::default();
        assert_eq!(config.code_formatter().name(), "builtin");
        config.formatter = FormatterKind::Prettier;
        assert_eq!(config.code_formatter().name(), "npx");
    }
}
