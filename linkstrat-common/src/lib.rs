//! # LinkStrat Common Library
//!
//! Shared infrastructure for the LinkStrat service:
//! - Error type used across crates
//! - Root folder and configuration file resolution
//! - SQLite pool initialization and schema setup
//! - Generic key-value settings accessors

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
