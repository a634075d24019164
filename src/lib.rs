//! Calendar Insights WASM Module
//!
//! Client-side computation for the lunisolar calendar pages: the birthday
//! time machine's drift model and the glossary-annotated insight renderer.
//! DOM work, fetches and animation stay in JavaScript; this module only
//! turns inputs into values and HTML fragments.

pub mod annotate;
pub mod api;
pub mod drift;
pub mod glossary;
pub mod insight;
pub mod supersede;
pub mod utils;
pub mod visuals;

// Re-export commonly used types
pub use annotate::{annotate, AnnotatedOutput, Annotator, VisualBlock};
pub use drift::{estimate_drift, Direction, DriftError, DriftQuery, DriftResult};
pub use glossary::{Calendar, Glossary, GlossaryEntry};
pub use insight::InsightContext;
pub use visuals::{VisualCatalog, VisualContext, VisualTag, VisualTagId};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Calendar Insights WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        crate::wasm_warn!("Logger already initialized: {}", e);
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
