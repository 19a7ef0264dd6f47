//! Default account table.
//!
//! Playground addresses are short hex values, but source text is free to
//! spell them differently:
//! - Short form: "0x1"
//! - Padded form: "0x01"
//! - Full form: "0x0000000000000001"
//!
//! Lookups normalize to the padded form used by the editor before consulting
//! [`DEFAULT_ACCOUNTS`].

use tracing::warn;

/// The four pre-provisioned accounts, in their fixed order.
pub const DEFAULT_ACCOUNTS: [(&str, &str); 4] = [
    ("0x01", "Alice"),
    ("0x02", "Bob"),
    ("0x03", "Charlie"),
    ("0x04", "Dave"),
];

/// Normalize an address to lowercase with 0x prefix and at least two hex digits.
///
/// # Examples
///
/// ```
/// use playground_resolver::normalize_address;
///
/// assert_eq!(normalize_address("0x1"), "0x01");
/// assert_eq!(normalize_address("0x0000000000000003"), "0x03");
/// assert_eq!(normalize_address("0XAB"), "0xab");
/// ```
pub fn normalize_address(addr: &str) -> String {
    let addr = addr.trim();
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
        .to_lowercase();
    let trimmed = hex.trim_start_matches('0');
    format!("0x{:0>2}", trimmed)
}

/// Display name of a default account, or `None` for any other address.
///
/// # Examples
///
/// ```
/// use playground_resolver::name_of;
///
/// assert_eq!(name_of("0x02"), Some("Bob"));
/// assert_eq!(name_of("0x2"), Some("Bob"));
/// assert_eq!(name_of("0x05"), None);
/// ```
pub fn name_of(addr: &str) -> Option<&'static str> {
    let normalized = normalize_address(addr);
    DEFAULT_ACCOUNTS
        .iter()
        .find(|(address, _)| *address == normalized)
        .map(|(_, name)| *name)
}

/// Fill `accounts` up to `required` entries with unused default accounts.
///
/// Lists that already have `required` entries come back unchanged. Otherwise
/// unused defaults are appended in table order until the count is met, and
/// the result is sorted. When `required` exceeds what the table can supply,
/// every unused default is appended and the shortfall is logged.
///
/// # Examples
///
/// ```
/// use playground_resolver::pad_to_signer_count;
///
/// let signers = pad_to_signer_count(&["0x02".to_string()], 3);
/// assert_eq!(signers, vec!["0x01", "0x02", "0x03"]);
/// ```
pub fn pad_to_signer_count(accounts: &[String], required: usize) -> Vec<String> {
    if accounts.len() >= required {
        return accounts.to_vec();
    }

    let used: Vec<String> = accounts.iter().map(|a| normalize_address(a)).collect();
    let mut result = accounts.to_vec();
    for (address, _) in DEFAULT_ACCOUNTS {
        if result.len() == required {
            break;
        }
        if !used.iter().any(|u| u == address) {
            result.push(address.to_string());
        }
    }

    if result.len() < required {
        warn!(
            required,
            available = result.len(),
            "not enough default accounts to cover every signer"
        );
    }

    result.sort();
    result
}
