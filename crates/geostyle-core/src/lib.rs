//! GeoStyle Core - Domain models, configuration, and ports
//!
//! This crate contains the feature, rule and style models shared by the
//! resolution engine and its adapters, plus the port definitions for the
//! collaborators the engine consumes (feature sources and symbol assets).

pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod ports;

pub use error::{GeostyleError, Result};
