//! Text-fit estimation and the vertical quiz stack.

pub mod stack;
pub mod text;
