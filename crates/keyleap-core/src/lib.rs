#![forbid(unsafe_code)]

//! Core: canonical events, page geometry, categories, and the page capability.

pub mod category;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod page;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
