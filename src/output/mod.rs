//! Output formatters for duplicate scan results.
//!
//! This module provides the report renderers:
//! - plain text, one labeled block per group, for human consumption
//! - JSON for automation and scripting

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use text::TextOutput;
