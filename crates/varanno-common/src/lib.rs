//! varanno Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, error handling and logging setup for the varanno workspace.
//!
//! # Overview
//!
//! - **Types**: the validated dbSNP [`Identifier`](types::Identifier)
//! - **Error Handling**: [`VarannoError`] and its result alias
//! - **Logging**: tracing subscriber configuration shared by all binaries
//!
//! # Example
//!
//! ```
//! use varanno_common::types::Identifier;
//!
//! let id = Identifier::parse("  rs429358 ").unwrap();
//! assert_eq!(id.as_str(), "rs429358");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, VarannoError};
pub use types::Identifier;
