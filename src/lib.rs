//! Swachh Saathi: civic issue reporting.
//!
//! A pass-through API in front of the classification service, plus the view
//! models the report and dashboard pages are driven by.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod presentation;
pub mod proxy;
pub mod upstream;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::ProxyError;
pub use proxy::{router, AppState};
