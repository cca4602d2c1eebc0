//! Shared configuration, error handling and extractors for Flashquiz
//!
//! This crate provides common functionality used across the Flashquiz domains:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Repository error classification
//! - Validating JSON and path extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Path, ValidatedJson};
