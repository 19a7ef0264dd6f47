#![allow(dead_code, unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: project snapshots and scaffold sources
//! - `assertions`: checks on generated test code

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_in_order, assert_no_markers};
pub use fixtures::{
    contract_only_project, full_project, static_exporter, static_scaffold, write_project,
    write_scaffold_dir, SCAFFOLD_README,
};
