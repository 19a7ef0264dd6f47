//! Shared types for the playground-export workspace.
//!
//! This crate provides the data model every other crate in the workspace
//! speaks, so the extractor, resolver and exporter never depend on each other
//! just to share a struct.
//!
//! ## Project snapshot
//!
//! The [`project`] module holds the read-only [`Project`] snapshot handed to
//! the exporter: accounts with their draft contract code, transaction
//! templates and script templates.
//!
//! ## Extracted facts
//!
//! The [`facts`] module holds what the text extractor pulls out of Cadence
//! source: [`ImportRef`], [`ArgumentDecl`], and the synthesized
//! [`ArgumentGroup`] / [`Literal`] values used when emitting test code.

pub mod env_utils;
pub mod facts;
pub mod project;

pub use facts::{ArgumentDecl, ArgumentGroup, ImportRef, Literal};
pub use project::{Account, Project, ScriptTemplate, TransactionTemplate};
