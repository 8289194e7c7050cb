//! Arbor math - scalar intervals, bounding boxes and rays.
//!
//! Everything here is a plain `Copy` value type with no side effects.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::{Aabb, PAD_DELTA};
pub use interval::Interval;
pub use ray::Ray;
