//! API endpoint integration tests
//!
//! Run against a real Postgres with `TEST_DATABASE_URL` set:
//! `cargo test -p flashquiz-integration-tests -- --ignored`

#![allow(dead_code)]

mod common;
mod flashcards;
mod notes;
mod quiz;
