#![forbid(unsafe_code)]

//! Core: geometry, input modifiers, colors, and the logging facade used by
//! the panel drag-and-drop resolver and its hosts.

pub mod color;
pub mod geometry;
pub mod logging;
pub mod modifiers;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
