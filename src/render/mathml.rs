//! MathML renderer.

use super::{MathRenderer, RenderResult};
use crate::error::RenderError;
use latex2mathml::{latex_to_mathml, DisplayStyle};

/// Renderer that converts LaTeX to MathML with `latex2mathml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathMLRenderer;

impl MathMLRenderer {
    /// Create a new MathML renderer.
    pub fn new() -> Self {
        Self
    }

    fn convert(&self, latex: &str, style: DisplayStyle) -> RenderResult {
        latex_to_mathml(latex, style).map_err(|e| RenderError::Backend(format!("{:?}", e)))
    }
}

impl MathRenderer for MathMLRenderer {
    fn render_inline(&self, latex: &str) -> RenderResult {
        self.convert(latex, DisplayStyle::Inline)
    }

    fn render_display(&self, latex: &str) -> RenderResult {
        self.convert(latex, DisplayStyle::Block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mathml_inline() {
        let renderer = MathMLRenderer::new();
        let result = renderer.render_inline("x^2").unwrap();
        assert!(result.starts_with("<math"));
        assert!(result.contains("display=\"inline\""));
    }

    #[test]
    fn test_mathml_display() {
        let renderer = MathMLRenderer::new();
        let result = renderer.render_display("\\frac{1}{2}").unwrap();
        assert!(result.contains("display=\"block\""));
        assert!(result.contains("mfrac"));
    }

    #[test]
    fn test_mathml_rejects_unknown_environment() {
        let renderer = MathMLRenderer::new();
        assert!(matches!(
            renderer.render_inline("\\begin{nosuchenv} x \\end{nosuchenv}"),
            Err(RenderError::Backend(_))
        ));
    }
}
