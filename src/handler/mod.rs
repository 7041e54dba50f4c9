//! Request handler module
//!
//! Responsible for request routing dispatch and the guess endpoint.

pub mod guess;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
