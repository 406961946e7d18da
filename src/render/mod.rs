//! Math rendering backends.
//!
//! A renderer turns one LaTeX expression into markup that embeds a `<math>`
//! element. The pipeline treats it as an opaque, fallible capability, so any
//! implementation of [`MathRenderer`] can be passed in, including closures
//! wrapped in [`FnRenderer`].

#[cfg(feature = "katex")]
mod katex;
#[cfg(feature = "mathml")]
mod mathml;

#[cfg(feature = "katex")]
pub use self::katex::KaTeXRenderer;
#[cfg(feature = "mathml")]
pub use self::mathml::MathMLRenderer;

use crate::error::{ConfigError, RenderError, Result};
use serde::Deserialize;

/// Result of rendering a single expression.
pub type RenderResult = std::result::Result<String, RenderError>;

/// Math rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathBackend {
    /// Convert with `latex2mathml` (requires the `mathml` feature).
    #[default]
    MathML,
    /// Convert with KaTeX in MathML output mode (requires the `katex` feature).
    KaTeX,
}

impl MathBackend {
    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            MathBackend::MathML => "mathml",
            MathBackend::KaTeX => "katex",
        }
    }
}

/// Trait for math renderers.
pub trait MathRenderer: Send + Sync {
    /// Render inline math.
    fn render_inline(&self, latex: &str) -> RenderResult;

    /// Render display math.
    fn render_display(&self, latex: &str) -> RenderResult;

    /// Render in the given display mode.
    fn render(&self, latex: &str, display_mode: bool) -> RenderResult {
        if display_mode {
            self.render_display(latex)
        } else {
            self.render_inline(latex)
        }
    }
}

impl<R: MathRenderer + ?Sized> MathRenderer for Box<R> {
    fn render_inline(&self, latex: &str) -> RenderResult {
        (**self).render_inline(latex)
    }

    fn render_display(&self, latex: &str) -> RenderResult {
        (**self).render_display(latex)
    }
}

/// Create a math renderer for the given backend.
///
/// Fails when the backend was not compiled into this build.
pub fn create_renderer(backend: MathBackend) -> Result<Box<dyn MathRenderer>> {
    match backend {
        MathBackend::MathML => {
            #[cfg(feature = "mathml")]
            {
                Ok(Box::new(MathMLRenderer::new()))
            }
            #[cfg(not(feature = "mathml"))]
            {
                Err(ConfigError::BackendUnavailable(backend.name().to_string()).into())
            }
        }
        MathBackend::KaTeX => {
            #[cfg(feature = "katex")]
            {
                Ok(Box::new(KaTeXRenderer::new()))
            }
            #[cfg(not(feature = "katex"))]
            {
                Err(ConfigError::BackendUnavailable(backend.name().to_string()).into())
            }
        }
    }
}

/// Adapts a closure `(latex, display_mode) -> RenderResult` into a renderer.
pub struct FnRenderer<F> {
    render: F,
}

impl<F> FnRenderer<F>
where
    F: Fn(&str, bool) -> RenderResult + Send + Sync,
{
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

impl<F> MathRenderer for FnRenderer<F>
where
    F: Fn(&str, bool) -> RenderResult + Send + Sync,
{
    fn render_inline(&self, latex: &str) -> RenderResult {
        (self.render)(latex, false)
    }

    fn render_display(&self, latex: &str) -> RenderResult {
        (self.render)(latex, true)
    }
}
