//! Client for the puzzle and player-statistics backend.

pub mod client;

pub use client::{PuzzleClient, DEFAULT_API_URL};
