//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the static file handler and the
//! verification endpoint, decoupled from business logic.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_empty_response, build_json_response, build_options_response,
};
