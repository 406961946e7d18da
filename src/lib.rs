//! # mathml-extract
//!
//! Extracts the LaTeX math embedded in free text and turns every expression
//! into a clean, portable MathML fragment.
//!
//! ## Pipeline
//!
//! 1. **Scan**: find `$...$` (inline) and `$$...$$` (display) spans, left to
//!    right. `$$` always opens a display span.
//! 2. **Normalize**: render each span with a [`MathRenderer`], pull out the
//!    `<math>` root, strip `<annotation>` nodes, unwrap `<semantics>` and a
//!    lone top-level `<mrow>`, then re-serialize.
//! 3. **Assemble**: join the fragments with a blank line, in source order.
//!    Spans that fail are skipped and reported; if nothing succeeds the output
//!    is [`NO_MATH_SENTINEL`].
//!
//! ## Quick Start
//!
//! ```rust
//! use mathml_extract::{assemble, FnRenderer};
//!
//! // Any renderer works; here a stand-in that wraps the LaTeX in <mi>.
//! let renderer = FnRenderer::new(|latex: &str, _display: bool| {
//!     Ok(format!(
//!         "<math><semantics><mrow><mi>{0}</mi></mrow><annotation>{0}</annotation></semantics></math>",
//!         latex
//!     ))
//! });
//!
//! let assembly = assemble("Let $x$ be real and $$y$$.", &renderer);
//! assert_eq!(assembly.output, "<math><mi>x</mi></math>\n\n<math><mi>y</mi></math>");
//! assert!(assembly.failures.is_empty());
//! ```
//!
//! ## Configuration
//!
//! [`ExtractConfig`] selects the backend, the sentinel text, parallel span
//! normalization and scanner options. It can be read from TOML:
//!
//! ```text
//! backend = "mathml"
//! parallel = true
//!
//! [scan]
//! skip_escaped_dollars = true
//! ```
//!
//! ## Features
//!
//! - `mathml` (default): `latex2mathml` backend
//! - `katex`: KaTeX backend (MathML output)
//! - `cli`: the `mathml-extract` command-line tool
//!
//! ## FFI
//!
//! The library provides a C-compatible FFI; see the `ffi` module.
//!
//! ## Logging
//!
//! Per-span failures and other events are emitted with `tracing`. The library
//! installs no subscriber.

pub mod assemble;
pub mod ast;
pub mod config;
pub mod error;
pub mod normalize;
pub mod render;
pub mod scanner;

// FFI module (always compiled for cdylib)
pub mod ffi;

// Convenience re-exports
pub use assemble::{assemble, assemble_many, assemble_with_config, Assembly, NO_MATH_SENTINEL};
pub use ast::{Element, MathNode, MathSpan, NormalizedFragment, SpanFailure};
pub use config::ExtractConfig;
pub use error::{ConfigError, Error, RenderError, Result, SpanError};
pub use normalize::{normalize, normalize_markup};
pub use render::{create_renderer, FnRenderer, MathBackend, MathRenderer};
pub use scanner::{scan, scan_with_config, ScanConfig};

/// Build the configured renderer and assemble one document.
///
/// Fails only when the renderer cannot be created; per-span problems are
/// reported in [`Assembly::failures`].
pub fn extract_mathml(text: &str, config: &ExtractConfig) -> Result<Assembly> {
    let renderer = config.renderer()?;
    Ok(assemble_with_config(text, &renderer, config))
}
