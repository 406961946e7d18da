//! KaTeX renderer in MathML output mode.

use super::{MathRenderer, RenderResult};
use crate::error::RenderError;

/// Renderer that runs KaTeX and keeps only its MathML output.
///
/// KaTeX wraps the expression in `<semantics>` together with an
/// `<annotation encoding="application/x-tex">` carrying the source, which the
/// normalizer strips again.
#[derive(Debug, Clone, Copy, Default)]
pub struct KaTeXRenderer;

impl KaTeXRenderer {
    /// Create a new KaTeX renderer.
    pub fn new() -> Self {
        Self
    }

    fn convert(&self, latex: &str, display_mode: bool) -> RenderResult {
        let opts = katex::Opts::builder()
            .display_mode(display_mode)
            .output_type(katex::OutputType::Mathml)
            .throw_on_error(true)
            .build()
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        katex::render_with_opts(latex, &opts).map_err(|e| RenderError::Backend(e.to_string()))
    }
}

impl MathRenderer for KaTeXRenderer {
    fn render_inline(&self, latex: &str) -> RenderResult {
        self.convert(latex, false)
    }

    fn render_display(&self, latex: &str) -> RenderResult {
        self.convert(latex, true)
    }
}
