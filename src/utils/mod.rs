//! Utilities module
//!
//! Contains error handling, logging and SSE framing

pub mod error;
pub mod logging;
pub mod sse;
