//! Project snapshot consumed by the exporter.
//!
//! Field names follow the playground's JSON shape (`draftCode`,
//! `transactionTemplates`, ...) so a snapshot saved by the editor can be
//! deserialized as-is.

use serde::{Deserialize, Serialize};

/// A read-only snapshot of one playground project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transaction_templates: Vec<TransactionTemplate>,
    #[serde(default)]
    pub script_templates: Vec<ScriptTemplate>,
}

/// One of the default emulator accounts and the contract drafted on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    #[serde(default)]
    pub draft_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTemplate {
    pub title: String,
    pub script: String,
    /// Accounts picked as signers in the editor, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptTemplate {
    pub title: String,
    pub script: String,
}

impl Project {
    /// Parse a snapshot from its JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
