use chrono::Utc;

/// Prefix of every alert dedup key the console generates.
pub const DEDUP_PREFIX: &str = "demo";

/// Dedup key for a fresh alert: `demo-<scenario id>-<unix millis>`.
#[must_use]
pub fn dedup_key(scenario_id: &str) -> String {
    dedup_key_at(scenario_id, unix_millis())
}

#[must_use]
pub fn dedup_key_at(scenario_id: &str, unix_millis: i64) -> String {
    format!("{DEDUP_PREFIX}-{scenario_id}-{unix_millis}")
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Seconds since the Unix epoch, as sent in metric points.
#[must_use]
pub fn unix_seconds() -> i64 {
    Utc::now().timestamp()
}

/// RFC 3339 timestamp used by Alertmanager and Sentry payloads.
#[must_use]
pub fn rfc3339_now() -> String {
    Utc::now().to_rfc3339()
}
