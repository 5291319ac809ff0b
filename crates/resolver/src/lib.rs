//! Page content resolution for localpages.
//!
//! Orchestrates the content cache and the generation capability into a
//! single `resolve` operation:
//!
//! - Cache-aside reads of the three content fields per key
//! - At most one concurrent generation per normalized key process-wide
//! - Deterministic fallback content when generation fails
//!
//! No error crosses the resolver boundary; every failure path degrades to
//! a usable bundle.

pub mod fallback;
pub mod resolver;

pub use fallback::fallback_bundle;
pub use resolver::{ContentSource, PageContentResolver, Resolution};
