//! Package writers: where a finished export bundle ends up.
//!
//! Writers receive files one at a time and only make them visible on
//! [`PackageWriter::finalize`]. A writer dropped before finalizing leaves
//! nothing behind.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Summary of a finalized package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageArtifact {
    /// Where the package was written; `None` for in-memory writers.
    pub location: Option<PathBuf>,
    pub files: usize,
    pub bytes: usize,
}

/// Accepts bundle files and materializes them as one package.
#[async_trait::async_trait]
pub trait PackageWriter: Send {
    async fn write(&mut self, path: &str, contents: &str) -> Result<()>;

    async fn finalize(&mut self) -> Result<PackageArtifact>;
}

/// Reject absolute paths and anything that climbs out of the package root.
fn validate_relative(path: &str) -> Result<&Path> {
    let rel = Path::new(path);
    if path.is_empty()
        || rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
    {
        bail!("Invalid package path: {:?}", path);
    }
    Ok(rel)
}

/// Writes the bundle as a directory tree.
///
/// Files are staged in a sibling `<target>.partial-<id>` directory which is
/// renamed onto the target only after every file has been written.
#[derive(Debug)]
pub struct DirectoryPackageWriter {
    target: PathBuf,
    staging: PathBuf,
    replace_existing: bool,
    files: usize,
    bytes: usize,
    finalized: bool,
}

impl DirectoryPackageWriter {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        let id = uuid::Uuid::new_v4().simple().to_string();
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "export".to_string());
        let staging = target.with_file_name(format!("{}.partial-{}", file_name, &id[..8]));
        Self {
            target,
            staging,
            replace_existing: false,
            files: 0,
            bytes: 0,
            finalized: false,
        }
    }

    /// Replace an existing target directory instead of failing.
    pub fn replace_existing(mut self, replace: bool) -> Self {
        self.replace_existing = replace;
        self
    }
}

async fn path_exists(path: &Path) -> Result<bool> {
    fs::try_exists(path)
        .await
        .with_context(|| format!("Failed to inspect {}", path.display()))
}

#[async_trait::async_trait]
impl PackageWriter for DirectoryPackageWriter {
    async fn write(&mut self, path: &str, contents: &str) -> Result<()> {
        if self.finalized {
            bail!("Package already finalized");
        }
        let full = self.staging.join(validate_relative(path)?);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&full, contents)
            .await
            .with_context(|| format!("Failed to write {}", full.display()))?;
        self.files += 1;
        self.bytes += contents.len();
        debug!(path, bytes = contents.len(), "staged package file");
        Ok(())
    }

    async fn finalize(&mut self) -> Result<PackageArtifact> {
        if self.finalized {
            bail!("Package already finalized");
        }
        if !path_exists(&self.staging).await? {
            fs::create_dir_all(&self.staging)
                .await
                .with_context(|| format!("Failed to create {}", self.staging.display()))?;
        }
        if path_exists(&self.target).await? {
            if !self.replace_existing {
                bail!(
                    "Output directory {} already exists",
                    self.target.display()
                );
            }
            fs::remove_dir_all(&self.target)
                .await
                .with_context(|| format!("Failed to remove {}", self.target.display()))?;
        }
        fs::rename(&self.staging, &self.target)
            .await
            .with_context(|| {
                format!(
                    "Failed to move {} to {}",
                    self.staging.display(),
                    self.target.display()
                )
            })?;
        self.finalized = true;
        info!(output = %self.target.display(), files = self.files, "package written");
        Ok(PackageArtifact {
            location: Some(self.target.clone()),
            files: self.files,
            bytes: self.bytes,
        })
    }
}

impl Drop for DirectoryPackageWriter {
    fn drop(&mut self) {
        if !self.finalized && self.staging.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.staging) {
                warn!(staging = %self.staging.display(), error = %e, "failed to clean staging directory");
            }
        }
    }
}

#[derive(Serialize)]
struct JsonPackage<'a> {
    files: &'a BTreeMap<String, String>,
}

/// Writes the whole bundle as one JSON document: `{"files": {path: contents}}`.
#[derive(Debug)]
pub struct JsonPackageWriter {
    target: PathBuf,
    files: BTreeMap<String, String>,
    finalized: bool,
}

impl JsonPackageWriter {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            files: BTreeMap::new(),
            finalized: false,
        }
    }
}

#[async_trait::async_trait]
impl PackageWriter for JsonPackageWriter {
    async fn write(&mut self, path: &str, contents: &str) -> Result<()> {
        if self.finalized {
            bail!("Package already finalized");
        }
        validate_relative(path)?;
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }

    async fn finalize(&mut self) -> Result<PackageArtifact> {
        if self.finalized {
            bail!("Package already finalized");
        }
        let json = serde_json::to_string_pretty(&JsonPackage { files: &self.files })?;
        if let Some(parent) = self.target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        // Write-then-rename: the target never holds a partial document.
        let tmp = self.target.with_extension("json.partial");
        fs::write(&tmp, &json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.target)
            .await
            .map_err(|e| anyhow!("Failed to move package into {}: {}", self.target.display(), e))?;

        self.finalized = true;
        info!(output = %self.target.display(), files = self.files.len(), "package written");
        Ok(PackageArtifact {
            location: Some(self.target.clone()),
            files: self.files.len(),
            bytes: json.len(),
        })
    }
}

/// Keeps the package in memory.
#[derive(Debug, Default)]
pub struct MemoryPackageWriter {
    files: BTreeMap<String, String>,
    finalized: bool,
}

impl MemoryPackageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

#[async_trait::async_trait]
impl PackageWriter for MemoryPackageWriter {
    async fn write(&mut self, path: &str, contents: &str) -> Result<()> {
        validate_relative(path)?;
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }

    async fn finalize(&mut self) -> Result<PackageArtifact> {
        self.finalized = true;
        Ok(PackageArtifact {
            location: None,
            files: self.files.len(),
            bytes: self.files.values().map(String::len).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_relative() {
        assert!(validate_relative("test/index.test.js").is_ok());
        assert!(validate_relative("/etc/passwd").is_err());
        assert!(validate_relative("../escape.cdc").is_err());
        assert!(validate_relative("cadence/./x.cdc").is_ok());
        assert!(validate_relative("").is_err());
    }

    #[tokio::test]
    async fn test_directory_writer_stages_then_moves() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");
        let mut writer = DirectoryPackageWriter::new(&target);

        writer.write("test/README.md", "# hi").await.unwrap();
        writer.write("cadence/contracts/Foo.cdc", "contract Foo {}").await.unwrap();
        assert!(!target.exists());

        let artifact = writer.finalize().await.unwrap();
        assert_eq!(artifact.files, 2);
        assert_eq!(artifact.location.as_deref(), Some(target.as_path()));
        assert_eq!(
            fs::read_to_string(target.join("cadence/contracts/Foo.cdc")).unwrap(),
            "contract Foo {}"
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[tokio::test]
    async fn test_directory_writer_dropped_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");
        {
            let mut writer = DirectoryPackageWriter::new(&target);
            writer.write("test/README.md", "# hi").await.unwrap();
        }
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_directory_writer_existing_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("old.txt"), "old").unwrap();

        let mut writer = DirectoryPackageWriter::new(&target);
        writer.write("new.txt", "new").await.unwrap();
        assert!(writer.finalize().await.is_err());
        assert!(target.join("old.txt").exists());

        let mut writer = DirectoryPackageWriter::new(&target).replace_existing(true);
        writer.write("new.txt", "new").await.unwrap();
        writer.finalize().await.unwrap();
        assert!(!target.join("old.txt").exists());
        assert!(target.join("new.txt").exists());
    }

    #[tokio::test]
    async fn test_directory_writer_empty_package() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/out");
        fs::create_dir_all(dir.path().join("nested")).unwrap();

        let artifact = DirectoryPackageWriter::new(&target).finalize().await.unwrap();
        assert_eq!(artifact.files, 0);
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_directory_writer_rejects_escape() {
        let dir = TempDir::new().unwrap();
        let mut writer = DirectoryPackageWriter::new(dir.path().join("out"));
        assert!(writer.write("../outside.txt", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_json_writer() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("export.json");
        let mut writer = JsonPackageWriter::new(&target);
        writer.write("test/package.json", "{}").await.unwrap();
        writer.write("cadence/scripts/a.cdc", "pub fun main() {}").await.unwrap();
        let artifact = writer.finalize().await.unwrap();
        assert_eq!(artifact.files, 2);

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(parsed["files"]["test/package.json"], "{}");
        assert_eq!(parsed["files"]["cadence/scripts/a.cdc"], "pub fun main() {}");
        assert!(writer.write("late.txt", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_memory_writer() {
        let mut writer = MemoryPackageWriter::new();
        writer.write("a/b.txt", "abc").await.unwrap();
        let artifact = writer.finalize().await.unwrap();
        assert!(writer.is_finalized());
        assert_eq!(artifact.location, None);
        assert_eq!(artifact.bytes, 3);
        assert_eq!(writer.files().get("a/b.txt").map(String::as_str), Some("abc"));
    }
}
