//! Utility modules for the ABC editor

pub mod performance;

// Re-export commonly used types
pub use performance::RenderTimings;
