//! HTTP handlers for the Notes domain

pub mod notes;
