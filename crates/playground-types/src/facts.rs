//! Facts extracted from Cadence source text.

use serde::Serialize;
use std::fmt;

/// One `import <name> from <address>` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRef {
    pub name: String,
    pub address: String,
}

/// One declared parameter of a transaction or script entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl ArgumentDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A representative value for an argument type, rendered as JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    /// Fixed-point value kept as its decimal text so `1.0` stays `1.0`.
    Fix(&'static str),
    Bool(bool),
    Str(&'static str),
    Address(&'static str),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Fix(value) => write!(f, "{}", value),
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Str(value) | Literal::Address(value) => write!(f, "\"{}\"", value),
        }
    }
}

/// A run of consecutive arguments sharing one type.
///
/// `values` holds one synthesized default per argument in the run; `None`
/// marks a type with no known default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentGroup {
    pub values: Vec<Option<Literal>>,
    #[serde(rename = "type")]
    pub ty: String,
}
