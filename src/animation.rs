//! Frame-driven motion primitives: easing curves, range interpolation, springs and waves.

pub mod ease;
pub mod interpolate;
pub mod proc;
pub mod spring;
