//! Scaffold file sources.
//!
//! An export always bundles the same four files next to the generated tests:
//! a README, the npm manifest, the Babel config and the Jest config. Where
//! they come from is the caller's choice:
//!
//! - [`HttpScaffoldSource`]: raw files under a versioned remote base URL
//! - [`DirectoryScaffoldSource`]: a local checkout, for offline exports
//! - [`StaticScaffoldSource`]: fixed in-memory contents
//!
//! Any failure to fetch is returned as-is. Nothing is retried; the export
//! that asked for the file is expected to abort.

use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::endpoints::join_url;

pub const README_PATH: &str = "README.md";
pub const PACKAGE_JSON_PATH: &str = "package.json";
pub const BABEL_CONFIG_PATH: &str = "babel.config.json";
pub const JEST_CONFIG_PATH: &str = "jest.config.json";

/// Scaffold files, in fetch order.
pub const SCAFFOLD_PATHS: [&str; 4] = [
    README_PATH,
    PACKAGE_JSON_PATH,
    BABEL_CONFIG_PATH,
    JEST_CONFIG_PATH,
];

/// Anything that can produce the raw text of a scaffold file by relative path.
#[async_trait::async_trait]
pub trait ScaffoldSource: Send + Sync {
    /// Fetch one file by its path relative to the scaffold root.
    async fn fetch(&self, path: &str) -> Result<String>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// The four scaffold files of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFiles {
    pub readme: String,
    pub package_json: String,
    pub babel_config: String,
    pub jest_config: String,
}

impl ScaffoldFiles {
    /// Pairs of (relative path, contents) in [`SCAFFOLD_PATHS`] order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            (README_PATH, self.readme.as_str()),
            (PACKAGE_JSON_PATH, self.package_json.as_str()),
            (BABEL_CONFIG_PATH, self.babel_config.as_str()),
            (JEST_CONFIG_PATH, self.jest_config.as_str()),
        ]
    }
}

/// Fetch all four scaffold files one after another; the first failure aborts.
pub async fn fetch_scaffold(source: &dyn ScaffoldSource) -> Result<ScaffoldFiles> {
    info!(source = %source.describe(), "fetching scaffold files");
    let mut fetched = Vec::with_capacity(SCAFFOLD_PATHS.len());
    for path in SCAFFOLD_PATHS {
        let text = source
            .fetch(path)
            .await
            .with_context(|| format!("Failed to fetch scaffold file {}", path))?;
        debug!(path, bytes = text.len(), "scaffold file fetched");
        fetched.push(text);
    }

    let [readme, package_json, babel_config, jest_config]: [String; 4] = fetched
        .try_into()
        .map_err(|_| anyhow!("Scaffold source returned an incomplete file set"))?;
    Ok(ScaffoldFiles {
        readme,
        package_json,
        babel_config,
        jest_config,
    })
}

/// Scaffold files served over HTTP from a base URL.
#[derive(Clone, Debug)]
pub struct HttpScaffoldSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpScaffoldSource {
    /// Create a source for `base_url` with explicit request and connect timeouts.
    pub fn with_timeouts(base_url: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }
}

#[async_trait::async_trait]
impl ScaffoldSource for HttpScaffoldSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        let url = join_url(&self.base_url, path);
        let agent = self.agent.clone();
        debug!(%url, "GET scaffold file");

        // ureq blocks; keep it off the async worker threads.
        tokio::task::spawn_blocking(move || -> Result<String> {
            agent
                .get(&url)
                .call()
                .map_err(|e| anyhow!("Scaffold request to {} failed: {}", url, e))?
                .into_string()
                .map_err(|e| anyhow!("Failed to read scaffold response from {}: {}", url, e))
        })
        .await
        .map_err(|e| anyhow!("Scaffold fetch task failed: {}", e))?
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Scaffold files read from a local directory.
#[derive(Clone, Debug)]
pub struct DirectoryScaffoldSource {
    root: PathBuf,
}

impl DirectoryScaffoldSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl ScaffoldSource for DirectoryScaffoldSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        let full = self.root.join(path);
        tokio::fs::read_to_string(&full)
            .await
            .with_context(|| format!("Failed to read scaffold file {}", full.display()))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Scaffold files held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticScaffoldSource {
    files: BTreeMap<String, String>,
}

impl StaticScaffoldSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose four files all exist and are empty.
    pub fn empty() -> Self {
        SCAFFOLD_PATHS
            .iter()
            .fold(Self::new(), |source, path| source.with_file(path, ""))
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.to_string(), contents.to_string());
        self
    }
}

#[async_trait::async_trait]
impl ScaffoldSource for StaticScaffoldSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("No static scaffold file for {}", path))
    }

    fn describe(&self) -> String {
        "in-memory scaffold".to_string()
    }
}
