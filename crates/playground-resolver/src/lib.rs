//! Playground Resolver
//!
//! Default emulator accounts and address handling for playground exports.
//!
//! This crate provides:
//! - [`accounts`]: the fixed `0x01`..`0x04` account table, address-to-name
//!   lookup, and signer padding
//!
//! The playground only ever offers four accounts, so the table is a constant
//! rather than configuration: every export sees the same names for the same
//! addresses.

pub mod accounts;

pub use accounts::{name_of, normalize_address, pad_to_signer_count, DEFAULT_ACCOUNTS};
