//! # Domain Models
//!
//! Pure data types shared by every slice of the console: license plans and add-ons, the
//! scenario record, and the application configuration.
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod license;
pub mod scenario;
