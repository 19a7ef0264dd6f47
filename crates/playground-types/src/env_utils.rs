//! Environment variable parsing utilities.
//!
//! Every `PLAYGROUND_*` override goes through these helpers so parsing and
//! defaulting behave the same for each setting.
//!
//! # Example
//!
//! ```
//! use playground_types::env_utils::{env_var, env_var_or};
//!
//! let timeout: u64 = env_var_or("PLAYGROUND_FETCH_TIMEOUT_SECS", 30);
//! let custom: Option<u64> = env_var("PLAYGROUND_CUSTOM_VALUE");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
///
/// Returns the default if the variable is not set or cannot be parsed.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Get an environment variable as a string, ignoring blank values.
///
/// # Example
///
/// ```
/// use playground_types::env_utils::env_nonempty;
///
/// let dir: Option<String> = env_nonempty("PLAYGROUND_SCAFFOLD_DIR");
/// ```
pub fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get an environment variable as a string with a default value.
pub fn env_string_or(key: &str, default: &str) -> String {
    env_nonempty(key).unwrap_or_else(|| default.to_string())
}
