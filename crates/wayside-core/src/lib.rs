//! Wayside Core - Domain models, ports, and configuration
//!
//! This crate contains the shared domain types and the port definitions that
//! the routing and map-data adapters implement.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod ports;
pub mod units;

pub use error::{Result, WaysideError};
