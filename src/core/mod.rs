/*!
 * Core Module
 * Fundamental types shared by the signal layer
 */

pub mod types;

// Re-export for convenience
pub use types::*;
