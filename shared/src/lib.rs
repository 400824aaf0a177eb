//! Video API Shared Library
//!
//! Request/response types and input validation shared by the backend
//! and its API clients.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;
