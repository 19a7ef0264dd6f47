//! The in-memory file set of one export.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{info, warn};

pub const TEST_DIR: &str = "test";
pub const TEST_FILE_PATH: &str = "test/index.test.js";
pub const CONTRACTS_DIR: &str = "cadence/contracts";
pub const TRANSACTIONS_DIR: &str = "cadence/transactions";
pub const SCRIPTS_DIR: &str = "cadence/scripts";

/// What happens when two entities derive the same bundle path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CollisionPolicy {
    /// Last writer wins; logged.
    #[default]
    Overwrite,
    /// Fail the export.
    Reject,
    /// Append `_2`, `_3`, ... to the file stem.
    Suffix,
}

impl std::str::FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "reject" => Ok(Self::Reject),
            "suffix" => Ok(Self::Suffix),
            other => Err(format!("unknown collision policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    Collision { path: String },
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::Collision { path } => {
                write!(f, "two entities map to the same file {}", path)
            }
        }
    }
}

impl std::error::Error for BundleError {}

/// Kind of project entity a file or test case belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Contract,
    Transaction,
    Script,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Contract => "contract",
            EntityKind::Transaction => "transaction",
            EntityKind::Script => "script",
        }
    }

    pub fn source_dir(&self) -> &'static str {
        match self {
            EntityKind::Contract => CONTRACTS_DIR,
            EntityKind::Transaction => TRANSACTIONS_DIR,
            EntityKind::Script => SCRIPTS_DIR,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filesystem-safe name for a template title.
///
/// ASCII alphanumerics, `-` and `_` are kept, whitespace becomes `_`, anything
/// else is dropped. An empty result falls back to `<kind>_<index>` with a
/// one-based index.
///
/// ```
/// use playground_export::bundle::{slugify, EntityKind};
///
/// assert_eq!(slugify("Send Tokens!", EntityKind::Transaction, 0), "Send_Tokens");
/// assert_eq!(slugify("???", EntityKind::Script, 2), "script_3");
/// ```
pub fn slugify(title: &str, kind: EntityKind, index: usize) -> String {
    let slug: String = title
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();
    if slug.is_empty() {
        format!("{}_{}", kind.as_str(), index + 1)
    } else {
        slug
    }
}

/// Bundle path of an entity's raw Cadence source.
pub fn source_path(kind: EntityKind, name: &str) -> String {
    format!("{}/{}.cdc", kind.source_dir(), name)
}

/// File stem of a bundle path: `cadence/scripts/Read_2.cdc` gives `Read_2`.
pub fn file_stem(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    }
}

/// Ordered path to contents map, written once per export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportBundle {
    policy: CollisionPolicy,
    files: BTreeMap<String, String>,
}

impl ExportBundle {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            files: BTreeMap::new(),
        }
    }

    /// Resolve `candidate` against paths already in the bundle.
    ///
    /// Returns the path the entity should use: `candidate` itself, or a
    /// suffixed variant under [`CollisionPolicy::Suffix`].
    pub fn claim_path(&self, candidate: &str) -> Result<String, BundleError> {
        if !self.files.contains_key(candidate) {
            return Ok(candidate.to_string());
        }
        match self.policy {
            CollisionPolicy::Overwrite => {
                warn!(path = candidate, "path collision, later entity overwrites");
                Ok(candidate.to_string())
            }
            CollisionPolicy::Reject => Err(BundleError::Collision {
                path: candidate.to_string(),
            }),
            CollisionPolicy::Suffix => {
                let (stem, ext) = match candidate.rfind('.') {
                    Some(dot) if dot > candidate.rfind('/').map_or(0, |s| s + 1) => {
                        candidate.split_at(dot)
                    }
                    _ => (candidate, ""),
                };
                let resolved = (2..)
                    .map(|n| format!("{}_{}{}", stem, n, ext))
                    .find(|path| !self.files.contains_key(path))
                    .unwrap_or_else(|| candidate.to_string());
                info!(from = candidate, to = %resolved, "path collision, renamed");
                Ok(resolved)
            }
        }
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.files.values().map(String::len).sum()
    }
}
