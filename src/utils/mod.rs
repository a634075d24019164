//! Utility modules for the Calendar Insights module

pub mod html;

pub use html::{escape_attr, escape_text};
