//! # cv-core
//!
//! Core types, traits, and configuration for Curriculos RS.
//!
//! This crate provides the foundational building blocks used across the other crates:
//! - The `Id` primary key type
//! - The `Entity` trait carrying per-entity table names and API messages
//! - Configuration loaded from the process environment

pub mod config;
pub mod traits;

pub use config::{AppConfig, ConfigError};
pub use traits::*;
