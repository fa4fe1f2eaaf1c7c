//! Endpoint constants and helpers used by client and server.

/// Public endpoint serving the latest Argentine peso quotations.
pub const DEFAULT_RATE_URL: &str = "https://api.bluelytics.com.ar/v2/latest";
/// Path of the latest-quotations resource, shared by the public API and the local server.
pub const LATEST_PATH: &str = "/v2/latest";
/// Default TCP port of the local rate server.
pub const SERVER_PORT: u16 = 8080;
/// Minutes between a refresh and the next one the host should trigger.
pub const REFRESH_INTERVAL_MINUTES: i64 = 15;
/// Longest accepted refresh interval, one year.
pub const MAX_REFRESH_INTERVAL_MINUTES: i64 = 525_600;

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Builds the latest-quotations URL served at `ip:port`.
pub fn latest_url(ip: &str, port: u16) -> String {
    format!("http://{}{}", addr(ip, port), LATEST_PATH)
}
