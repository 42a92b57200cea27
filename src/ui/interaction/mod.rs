//! Mouse interaction: the per-frame registry of clickable cells.

pub mod hit_area;

pub use hit_area::{HitArea, HitAreaRegistry};
