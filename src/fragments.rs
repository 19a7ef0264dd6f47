//! Code fragments spliced into the test skeletons.
//!
//! Every builder returns an empty string when it has nothing to declare, so
//! the matching block marker drops out and its conditional renders empty.

use std::collections::BTreeMap;

use playground_resolver::{name_of, normalize_address};
use playground_types::{ArgumentGroup, ImportRef};

/// JSON-quoted string literal, valid as JavaScript.
pub fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// How generated code refers to an account: the bound variable for a default
/// account, a quoted address literal for anything else.
pub fn account_ref(address: &str) -> String {
    match name_of(address) {
        Some(name) => name.to_string(),
        None => js_string(address),
    }
}

/// `getAccountAddress` bindings for every resolvable address, ordered by
/// address and bound once each.
pub fn account_bindings<'a>(addresses: impl IntoIterator<Item = &'a str>) -> String {
    let named: BTreeMap<String, &'static str> = addresses
        .into_iter()
        .filter_map(|address| name_of(address).map(|name| (normalize_address(address), name)))
        .collect();

    named
        .values()
        .map(|name| format!("const {name} = await getAccountAddress({});\n", js_string(name)))
        .collect()
}

/// `addressMap` object mapping each imported contract to its account.
pub fn address_map(imports: &[ImportRef]) -> String {
    if imports.is_empty() {
        return String::new();
    }
    let entries: Vec<String> = imports
        .iter()
        .map(|import| format!("  {}: {}", import.name, account_ref(&import.address)))
        .collect();
    format!("const addressMap = {{\n{}\n}};\n", entries.join(",\n"))
}

/// Runtime rewrite of literal `getAccount(0x..)` calls in the loaded source
/// into the addresses of the named test accounts.
pub fn account_shim(account_calls: &[String]) -> String {
    if account_calls.is_empty() {
        return String::new();
    }

    let mut seen: Vec<&str> = Vec::new();
    for address in account_calls {
        if !seen.contains(&address.as_str()) {
            seen.push(address);
        }
    }
    let lookup: Vec<String> = seen
        .iter()
        .map(|address| format!("{}: {}", js_string(address), account_ref(address)))
        .collect();

    format!(
        "code = code.replace(/(?:getAccount\\(\\s*)(0x[0-9a-fA-F]+)(?:\\s*\\))/g, (_, match) => {{\n  \
         const accounts = {{ {} }};\n  \
         const name = accounts[match];\n  \
         return `getAccount(${{name}})`;\n\
         }});\n",
        lookup.join(", ")
    )
}

/// `signers` array in the order given.
pub fn signers(addresses: &[String]) -> String {
    if addresses.is_empty() {
        return String::new();
    }
    let refs: Vec<String> = addresses.iter().map(|a| account_ref(a)).collect();
    format!("const signers = [{}];\n", refs.join(", "))
}

/// `args` array: one entry per group, the group's defaults followed by its
/// `@onflow/types` constructor.
pub fn arguments(groups: &[ArgumentGroup]) -> String {
    if groups.is_empty() {
        return String::new();
    }
    let entries: Vec<String> = groups
        .iter()
        .map(|group| {
            let mut items: Vec<String> = group
                .values
                .iter()
                .map(|value| match value {
                    Some(literal) => literal.to_string(),
                    None => "undefined".to_string(),
                })
                .collect();
            items.push(js_type(&group.ty));
            format!("[{}]", items.join(", "))
        })
        .collect();
    format!("const args = [{}];\n", entries.join(", "))
}

/// `@onflow/types` expression for a Cadence type annotation.
///
/// ```
/// use playground_export::fragments::js_type;
///
/// assert_eq!(js_type("UFix64"), "t.UFix64");
/// assert_eq!(js_type("[String]"), "t.Array(t.String)");
/// assert_eq!(js_type("{String: Int}"), "t.Dictionary({ key: t.String, value: t.Int })");
/// assert_eq!(js_type("Address?"), "t.Optional(t.Address)");
/// ```
pub fn js_type(ty: &str) -> String {
    let ty = ty.trim();
    if let Some(inner) = ty.strip_suffix('?') {
        return format!("t.Optional({})", js_type(inner));
    }
    if let Some(inner) = ty.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return format!("t.Array({})", js_type(inner));
    }
    if let Some(inner) = ty.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        if let Some((key, value)) = split_top_level_colon(inner) {
            return format!(
                "t.Dictionary({{ key: {}, value: {} }})",
                js_type(key),
                js_type(value)
            );
        }
    }
    if !ty.is_empty() && ty.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return format!("t.{}", ty);
    }
    "undefined".to_string()
}

fn split_top_level_colon(s: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '{' | '[' => depth += 1,
            '>' | '}' | ']' => depth -= 1,
            ':' if depth == 0 => return Some((&s[..i], &s[i + 1..])),
            _ => {}
        }
    }
    None
}
