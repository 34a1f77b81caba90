//! Shared architecture types for archid.

pub mod arch;

// Re-exports
pub use arch::*;
