//! Representative argument values for generated tests.
//!
//! The generated test is meant to be edited by hand, so the values only need
//! to be well-typed placeholders. Types missing from the table synthesize
//! `None`, which the emitter writes as `undefined`.

use playground_types::{ArgumentDecl, ArgumentGroup, Literal};

/// Service account of the Flow emulator.
pub const EMULATOR_ADDRESS: &str = "0xf8d6e0586b0a20c7";

/// Default literal for a Cadence type name.
///
/// # Examples
///
/// ```
/// use playground_extractor::default_for;
/// use playground_types::Literal;
///
/// assert_eq!(default_for("Int"), Some(Literal::Int(1337)));
/// assert_eq!(default_for("Resource"), None);
/// ```
pub fn default_for(ty: &str) -> Option<Literal> {
    let literal = match ty.trim() {
        "Int" | "UInt" => Literal::Int(1337),
        "Int8" | "UInt8" => Literal::Int(8),
        "Int16" | "UInt16" => Literal::Int(16),
        "Int32" | "UInt32" => Literal::Int(32),
        "Int64" | "UInt64" => Literal::Int(64),
        "UFix64" => Literal::Fix("1.0"),
        "Bool" => Literal::Bool(true),
        "String" => Literal::Str("Hello"),
        "Address" => Literal::Address(EMULATOR_ADDRESS),
        _ => return None,
    };
    Some(literal)
}

/// Group consecutive arguments of the same type.
///
/// A new group starts exactly where the type changes; each group carries one
/// default per argument it absorbed.
pub fn group_arguments(decls: &[ArgumentDecl]) -> Vec<ArgumentGroup> {
    let mut groups: Vec<ArgumentGroup> = Vec::new();
    for decl in decls {
        let value = default_for(&decl.ty);
        match groups.last_mut() {
            Some(group) if group.ty == decl.ty => group.values.push(value),
            _ => groups.push(ArgumentGroup {
                values: vec![value],
                ty: decl.ty.clone(),
            }),
        }
    }
    groups
}
