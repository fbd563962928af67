//! Native providers, one per monitoring tool, plus the PagerDuty direct alerter.

mod cloudwatch;
mod datadog;
mod github;
mod grafana;
mod newrelic;
mod pagerduty;
mod prometheus;
mod sentry;
mod splunk;
mod uptimerobot;

pub use cloudwatch::CloudWatchProvider;
pub use datadog::{DatadogProvider, MetricSpike};
pub use github::GitHubActionsProvider;
pub use grafana::GrafanaProvider;
pub use newrelic::NewRelicProvider;
pub use pagerduty::{PagerDutyAlerter, direct_event};
pub use prometheus::PrometheusProvider;
pub use sentry::SentryProvider;
pub use splunk::SplunkProvider;
pub use uptimerobot::UptimeRobotProvider;

use drill_domain::scenario::Scenario;

/// `custom_details[key]`, or `fallback`.
fn detail_or<'a>(scenario: &'a Scenario, key: &str, fallback: &'a str) -> &'a str {
    scenario.payload.payload.detail(key).unwrap_or(fallback)
}

/// The alert summary, falling back to the scenario name.
fn summary(scenario: &Scenario) -> &str {
    scenario.payload.payload.summary.as_deref().unwrap_or(&scenario.name)
}

/// Payload severity, then scenario severity.
fn severity(scenario: &Scenario) -> Option<&str> {
    scenario.payload.payload.severity.as_deref().or(scenario.severity.as_deref())
}
