//! Playground Transport
//!
//! Sources for the static scaffold files every export bundles alongside the
//! generated tests.
//!
//! This crate provides:
//! - [`scaffold`]: the [`ScaffoldSource`] trait plus remote (HTTP), local
//!   directory and in-memory implementations
//! - [`endpoints`]: default scaffold location and URL resolution
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use playground_transport::{fetch_scaffold, resolve_scaffold_url, HttpScaffoldSource};
//!
//! let source = HttpScaffoldSource::with_timeouts(
//!     &resolve_scaffold_url(None),
//!     Duration::from_secs(30),
//!     Duration::from_secs(10),
//! );
//! let files = fetch_scaffold(&source).await?;
//! println!("{}", files.readme);
//! ```

pub mod endpoints;
pub mod scaffold;

pub use endpoints::{resolve_scaffold_url, DEFAULT_SCAFFOLD_URL};
pub use scaffold::{
    fetch_scaffold, DirectoryScaffoldSource, HttpScaffoldSource, ScaffoldFiles, ScaffoldSource,
    StaticScaffoldSource, SCAFFOLD_PATHS,
};
