//! Calendar Insights WASM API
//!
//! This module provides the JavaScript-facing API used by the calculator
//! and insights pages.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error conversion and console logging
//! - `drift`: Birthday time machine (lunisolar drift)
//! - `insight`: Insight text annotation and page helpers
//! - `gate`: Last-write-wins guard for async renders

pub mod helpers;
pub mod drift;
pub mod insight;
pub mod gate;

pub use drift::{estimate_drift, estimate_drift_from, time_machine, explain_drift};
pub use insight::{annotate_insight, annotate_with, config_title, highlight_command};
pub use gate::RenderGate;
