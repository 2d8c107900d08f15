//! Core business logic modules.

pub mod executor;
pub mod segmenter;
