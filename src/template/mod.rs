/// Template rendering layer
///
/// Pure string expansion of `{{key}}` placeholders against a TemplateContext.
/// No I/O and no errors: unknown placeholders pass through unchanged.

// Named values for one generation run
pub mod context;

// Single-pass placeholder expansion
pub mod renderer;

pub use context::TemplateContext;
pub use renderer::{render, unresolved_placeholders, value_text};
