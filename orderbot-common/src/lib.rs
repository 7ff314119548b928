//! Orderbot Common - Shared types and utilities for the orderbot services.
//!
//! This crate provides:
//! - Environment-driven configuration for the gateway and the chat client
//! - Error types and handling utilities
//! - Logging setup

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ClientConfig, GatewayConfig};
pub use error::{Error, Result};
pub use logging::init_logging;
