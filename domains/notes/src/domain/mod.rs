//! Domain layer for the Notes domain

pub mod entities;
