//! Endpoint configuration for the calculation service.

/// Production calculation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://floorplan-area.vercel.app/api/calculate";

/// Environment variable overriding the endpoint, mainly for local stubs.
pub const ENDPOINT_ENV_VAR: &str = "FLOORCHECK_ENDPOINT";

/// Resolves the endpoint URL: env override when set and non-empty, else the
/// compiled-in default.
pub fn endpoint_url() -> String {
    std::env::var(ENDPOINT_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}
