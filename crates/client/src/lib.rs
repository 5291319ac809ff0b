//! Client code for localpages.
//!
//! This crate provides the HTTP implementation of the content generation
//! capability consumed by the resolver.

pub mod generator;

pub use generator::{GeneratorConfig, HttpGenerator};

pub use generator::request::{GenerateRequest, RequestType};
pub use generator::response::GenerateResponse;
