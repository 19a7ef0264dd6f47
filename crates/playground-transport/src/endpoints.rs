use playground_types::env_utils::env_string_or;

/// Versioned base location of the flow-js-testing scaffold.
pub const DEFAULT_SCAFFOLD_URL: &str =
    "https://raw.githubusercontent.com/onflow/flow-playground-scaffold/v0.1.0";

const SCAFFOLD_URL_ENV: &str = "PLAYGROUND_SCAFFOLD_URL";

/// Pick the scaffold base URL: explicit value, then `PLAYGROUND_SCAFFOLD_URL`,
/// then [`DEFAULT_SCAFFOLD_URL`].
pub fn resolve_scaffold_url(explicit: Option<&str>) -> String {
    let url = match explicit.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => url.to_string(),
        None => env_string_or(SCAFFOLD_URL_ENV, DEFAULT_SCAFFOLD_URL),
    };
    url.trim_end_matches('/').to_string()
}

/// Join a base URL and a relative path with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
