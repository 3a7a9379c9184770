//! Per-frame scene graph and the builders for the 3D hook and the quiz overlay.

pub mod graph;
pub mod hook;
pub mod quiz;
