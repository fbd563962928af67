//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, identifiers and display helpers only.
//!
//! ## Dedup keys
//! ```rust
//! # use drill_kernel::ids::dedup_key_at;
//! assert_eq!(dedup_key_at("PD-001", 1_700_000_000_000), "demo-PD-001-1700000000000");
//! ```
//!
//! ## Config loading
//! ```rust,no_run
//! use drill_kernel::config::load_config;
//! use drill_kernel::domain::config::ConsoleConfig;
//!
//! let cfg: ConsoleConfig = load_config(Some("drill.toml")).unwrap_or_default();
//! ```
pub mod config;
pub mod ids;
pub mod secrets;

pub use drill_domain as domain;
