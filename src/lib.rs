//! CrofAI Adapter Library
//!
//! Maps canonical chat completion requests onto the CrofAI API and maps CrofAI
//! responses and event streams back onto the canonical gateway schema

pub mod config;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use models::canonical;
pub use providers::crofai::{transform_chat_response, transform_stream_chunk, CrofAiProvider, CROFAI};
pub use providers::{ParameterSpec, ParameterTable, Provider};
pub use services::build_request_body;
pub use utils::error::{AdapterError, AdapterResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
