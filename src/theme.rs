//! Seed-derived palettes and contrast rules.

pub mod color;
pub mod derive;
pub mod palette;
