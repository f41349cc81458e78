//! Service layer module
//!
//! Contains the provider request builder

pub mod request_builder;

pub use request_builder::build_request_body;
