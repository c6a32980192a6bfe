//! NFI Common Library
//!
//! Shared plumbing for the nota fiscal ingestion workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all NFI workspace members:
//!
//! - **Logging**: Centralized tracing configuration and initialization
//!
//! # Example
//!
//! ```no_run
//! use nfi_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     Ok(())
//! }
//! ```

pub mod logging;
