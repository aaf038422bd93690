//! Waste Registry Library
//!
//! This module exports the core components for testing and integration.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod reconcile;
pub mod router;
pub mod service;
pub mod sheet;
pub mod stats;
pub mod store;
pub mod types;
