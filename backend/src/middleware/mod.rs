//! Request middleware.
//!
//! Lifecycle concerns that wrap every handler, currently request tracing.

pub mod trace;

pub use trace::{Trace, TraceId};
