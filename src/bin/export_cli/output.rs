//! Output formatting for playground-export CLI

use anyhow::{Context, Result};

use playground_export::fragments::js_type;
use playground_export::writer::PackageArtifact;
use playground_extractor::SourceFacts;

pub fn print_artifact(artifact: &PackageArtifact, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(artifact).context("serialize package summary")?
        );
        return Ok(());
    }

    match &artifact.location {
        Some(location) => println!("Exported to {}", location.display()),
        None => println!("Exported in memory"),
    }
    println!("  files: {}", artifact.files);
    println!("  bytes: {}", artifact.bytes);
    Ok(())
}

/// Human-readable summary of extracted facts.
pub fn format_facts(facts: &SourceFacts) -> String {
    let mut out = String::new();

    match &facts.contract_name {
        Some(name) => out.push_str(&format!("Contract: {}\n", name)),
        None => out.push_str("Contract: (none)\n"),
    }
    match facts.signer_count {
        Some(count) => out.push_str(&format!("Signers: {}\n", count)),
        None => out.push_str("Signers: (no prepare clause)\n"),
    }

    out.push_str(&format!("Imports: {}\n", facts.imports.len()));
    for import in &facts.imports {
        out.push_str(&format!("  {} from {}\n", import.name, import.address));
    }

    out.push_str(&format!("Account calls: {}\n", facts.account_calls.len()));
    for address in &facts.account_calls {
        out.push_str(&format!("  {}\n", address));
    }

    out.push_str(&format!("Arguments: {}\n", facts.arguments.len()));
    for arg in &facts.arguments {
        out.push_str(&format!("  {}: {}\n", arg.name, arg.ty));
    }

    if !facts.argument_groups.is_empty() {
        out.push_str("Argument groups:\n");
        for group in &facts.argument_groups {
            let values: Vec<String> = group
                .values
                .iter()
                .map(|v| v.as_ref().map_or_else(|| "undefined".to_string(), |l| l.to_string()))
                .collect();
            out.push_str(&format!(
                "  [{}] as {}\n",
                values.join(", "),
                js_type(&group.ty)
            ));
        }
    }
    out
}
