//! Configuration module for the t-SNE expression plots.

pub mod atlas;
pub mod gradient;

mod debug; // Private because of the re-export. Forces files to use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use atlas::ATLAS;
pub use gradient::{GRADIENT, GradientConfig};
