//! Lexical fact extraction from Cadence source.
//!
//! None of these functions parse Cadence. Each one looks for a single narrow
//! pattern in the raw text:
//!
//! - `import <ident> from <0xHEX>`
//! - `getAccount(<0xHEX>)`
//! - `transaction(<params>)` or `fun main(<params>)`
//! - `prepare(<params>)`
//! - `contract <Ident> {`
//!
//! Text that does not match yields an empty or absent result. The one
//! exception is [`extract_signer_count`], which reports a missing `prepare`
//! clause as an error so callers decide what a signer-less transaction means.

use std::fmt;
use std::sync::LazyLock;

use playground_types::{ArgumentDecl, ImportRef};
use regex::Regex;
use tracing::debug;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"import\s+(\w+)\s+from\s+(0x[0-9a-fA-F]+)").expect("import pattern")
});

static GET_ACCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"getAccount\(\s*(0x[0-9a-fA-F]+)\s*\)").expect("getAccount pattern")
});

static TRANSACTION_PARAMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btransaction\s*\(([^)]*)\)").expect("transaction pattern")
});

static MAIN_PARAMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfun\s+main\s*\(([^)]*)\)").expect("main pattern"));

static PREPARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bprepare\s*\(([^)]*)\)").expect("prepare pattern"));

static CONTRACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bcontract\s+(?:interface\s+)?(\w+)\s*\{").expect("contract pattern")
});

/// Extraction failures a caller may want to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Signer counting was asked of text with no `prepare(...)` clause.
    MissingPrepare,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingPrepare => {
                write!(f, "no prepare(...) clause found in transaction source")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Every `import X from 0x...` in source order, duplicates included.
pub fn extract_imports(text: &str) -> Vec<ImportRef> {
    IMPORT_RE
        .captures_iter(text)
        .map(|caps| ImportRef {
            name: caps[1].to_string(),
            address: caps[2].to_string(),
        })
        .collect()
}

/// Addresses passed to `getAccount(...)`, sorted lexicographically.
pub fn extract_account_calls(text: &str) -> Vec<String> {
    let mut addresses: Vec<String> = GET_ACCOUNT_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect();
    addresses.sort();
    addresses
}

/// Parameters of the first `transaction(...)` list, else of `fun main(...)`.
pub fn extract_arguments(text: &str) -> Vec<ArgumentDecl> {
    let Some(caps) = TRANSACTION_PARAMS_RE
        .captures(text)
        .or_else(|| MAIN_PARAMS_RE.captures(text))
    else {
        return Vec::new();
    };
    let Some(list) = caps.get(1) else {
        return Vec::new();
    };

    split_params(list.as_str())
        .into_iter()
        .map(|param| match param.split_once(':') {
            Some((name, ty)) => ArgumentDecl::new(name.trim(), ty.trim()),
            None => {
                debug!(param, "parameter without a type annotation");
                ArgumentDecl::new(param, "")
            }
        })
        .collect()
}

/// Number of entries in the `prepare(...)` parameter list.
pub fn extract_signer_count(text: &str) -> Result<usize, ExtractError> {
    let caps = PREPARE_RE
        .captures(text)
        .ok_or(ExtractError::MissingPrepare)?;
    let list = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    Ok(split_params(list).len())
}

/// Name from the first `contract Name {` declaration.
pub fn extract_contract_name(text: &str) -> Option<String> {
    CONTRACT_RE.captures(text).map(|caps| caps[1].to_string())
}

/// Split a parameter list on top-level commas.
///
/// Commas nested in `<...>`, `{...}` or `[...]` stay inside their entry so
/// `d: {String: Int}, xs: [Int]` yields two entries. Blank entries are dropped.
fn split_params(list: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        match c {
            '<' | '{' | '[' => depth += 1,
            '>' | '}' | ']' => depth -= 1,
            ',' if depth <= 0 => {
                result.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    result.push(list[start..].trim());

    result.retain(|entry| !entry.is_empty());
    result
}
