//! Playground Extractor
//!
//! Best-effort fact extraction from Cadence source text.
//!
//! # Features
//!
//! - **Text extraction**: imports, `getAccount` calls, parameters, signer
//!   count and contract name via narrow regex patterns ([`text`])
//! - **Default values**: representative literals per argument type and
//!   grouping of same-typed runs ([`defaults`])
//! - **Source facts**: everything above gathered for one source in a single
//!   serializable summary ([`SourceFacts`])
//!
//! # Example
//!
//! ```
//! use playground_extractor::{extract_imports, group_arguments, extract_arguments};
//!
//! let code = "import Token from 0x01\ntransaction(amount: UFix64) { prepare(a: AuthAccount) {} }";
//! assert_eq!(extract_imports(code)[0].name, "Token");
//! assert_eq!(group_arguments(&extract_arguments(code))[0].ty, "UFix64");
//! ```

pub mod defaults;
pub mod text;

pub use defaults::{default_for, group_arguments, EMULATOR_ADDRESS};
pub use text::{
    extract_account_calls, extract_arguments, extract_contract_name, extract_imports,
    extract_signer_count, ExtractError,
};

use playground_types::{ArgumentDecl, ArgumentGroup, ImportRef};
use serde::Serialize;

/// Every fact the extractor can find in one source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFacts {
    pub imports: Vec<ImportRef>,
    pub account_calls: Vec<String>,
    pub arguments: Vec<ArgumentDecl>,
    pub argument_groups: Vec<ArgumentGroup>,
    /// `None` when the text has no `prepare(...)` clause.
    pub signer_count: Option<usize>,
    pub contract_name: Option<String>,
}

impl SourceFacts {
    pub fn scan(text: &str) -> Self {
        let arguments = extract_arguments(text);
        let argument_groups = group_arguments(&arguments);
        Self {
            imports: extract_imports(text),
            account_calls: extract_account_calls(text),
            arguments,
            argument_groups,
            signer_count: extract_signer_count(text).ok(),
            contract_name: extract_contract_name(text),
        }
    }
}
