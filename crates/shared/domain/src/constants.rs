//! Stable string identifiers shared across slices.

// Integration keys, as they appear in `scenario.tags.integration`.
pub const DATADOG: &str = "datadog";
pub const SENTRY: &str = "sentry";
pub const GITHUB_ACTIONS: &str = "github_actions";
pub const NEWRELIC: &str = "newrelic";
pub const SPLUNK: &str = "splunk";
pub const CLOUDWATCH: &str = "cloudwatch";
pub const PROMETHEUS: &str = "prometheus";
pub const GRAFANA: &str = "grafana";
pub const UPTIMEROBOT: &str = "uptimerobot";
pub const PAGERDUTY: &str = "pagerduty";
pub const PAGERDUTY_DIRECT: &str = "pagerduty_direct";

/// Every provider key in registry order.
pub const INTEGRATIONS: [&str; 9] = [
    DATADOG,
    SENTRY,
    GITHUB_ACTIONS,
    NEWRELIC,
    SPLUNK,
    CLOUDWATCH,
    PROMETHEUS,
    GRAFANA,
    UPTIMEROBOT,
];

// Key-value store keys.
pub const LICENSE_CONFIG_KEY: &str = "license_config";
pub const ORCHESTRATOR_URL_KEY: &str = "orchestrator_url";
pub const CREDENTIALS_PREFIX: &str = "credentials.";

/// Severities known to the catalog, most severe first.
pub const SEVERITIES: [&str; 4] = ["critical", "error", "warning", "info"];
