//! Cryptoquip - a terminal client for daily substitution-cipher puzzles.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod error;
pub mod grid;
pub mod models;
pub mod startup;
pub mod storage;
pub mod terminal;
pub mod traits;
pub mod ui;
