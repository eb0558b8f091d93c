//! Shared types and configuration for Amana.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Actor types carried by every operation
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
