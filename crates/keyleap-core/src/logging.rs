#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! This module provides re-exports of tracing macros when the `tracing`
//! feature is enabled. When the feature is disabled, no-op macros are
//! provided for compatibility, so hosts can instrument their [`Page`]
//! implementations without feature-gating every call site.
//!
//! [`Page`]: crate::page::Page

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

// When tracing is not enabled, provide no-op macros
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op error macro when tracing is disabled.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
