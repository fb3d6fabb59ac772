//! Hype tracker: estimates, scores and forecasts the popularity of mobile
//! apps and web products from indirect signals.
//!
//! The binary in `src/main.rs` wires these modules together; integration
//! tests in `tests/` drive them through the library.

pub mod insights;
pub mod metrics;
pub mod products;
pub mod report;
pub mod search;
pub mod services;
pub mod store;

// Binary plumbing
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
