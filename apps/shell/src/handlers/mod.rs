pub mod creds;
pub mod dispatch;
pub mod features;
pub mod license;
pub mod orchestrator;
pub mod scenarios;
