//! VEP REST client module
//!
//! HTTP client for the Ensembl Variant Effect Predictor lookup-by-id
//! endpoint.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ResponseClass, VepClient};
pub use types::RawLookupResult;
