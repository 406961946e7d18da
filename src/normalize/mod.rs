//! MathML normalizer.
//!
//! Renders one [`MathSpan`], pulls the `<math>` root out of the renderer's
//! output and rewrites it into a minimal, portable fragment:
//!
//! 1. every `<annotation>`/`<annotation-xml>` is removed, at any depth;
//! 2. every `<semantics>` wrapper is replaced by its children;
//! 3. a lone top-level `<mrow>` is replaced by its children.

pub mod extract;
pub mod rewrite;
pub mod tree;

use crate::ast::{MathSpan, NormalizedFragment};
use crate::error::{RenderError, SpanError};
use crate::render::MathRenderer;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Render and normalize a single span.
///
/// Renderer errors and panics are reported as a [`SpanError`] for this span
/// only. A caught panic still goes through the process panic hook, which by
/// default prints the message to stderr; install a quieter hook (as the CLI
/// does) if that is unwanted.
pub fn normalize<R>(span: &MathSpan, renderer: &R) -> Result<NormalizedFragment, SpanError>
where
    R: MathRenderer + ?Sized,
{
    let raw = render_guarded(renderer, &span.raw_latex, span.is_block)?;
    let serialized_markup = guarded(|| normalize_markup(&raw))?;

    Ok(NormalizedFragment {
        serialized_markup,
        source_order: span.source_order,
    })
}

/// Normalize already-rendered markup containing a `<math>` element.
pub fn normalize_markup(raw: &str) -> Result<String, SpanError> {
    let root = extract::extract_math_root(raw)?;
    let root = rewrite::rewrite_tree(root);
    Ok(tree::serialize(&root))
}

fn render_guarded<R>(renderer: &R, latex: &str, display_mode: bool) -> Result<String, RenderError>
where
    R: MathRenderer + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| renderer.render(latex, display_mode))) {
        Ok(result) => result,
        Err(payload) => Err(RenderError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Run a normalization step, turning a panic into [`SpanError::Panicked`].
fn guarded<T, F>(step: F) -> Result<T, SpanError>
where
    F: FnOnce() -> Result<T, SpanError>,
{
    match panic::catch_unwind(AssertUnwindSafe(step)) {
        Ok(result) => result,
        Err(payload) => Err(SpanError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    // payload is usually &str or String, but can be anything
    match payload.downcast_ref::<&str>() {
        Some(s) => (*s).to_string(),
        None => match payload.downcast_ref::<String>() {
            Some(s) => s.clone(),
            None => "non-string panic payload".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FnRenderer;
    use pretty_assertions::assert_eq;

    fn span(latex: &str, is_block: bool, source_order: usize) -> MathSpan {
        MathSpan {
            raw_latex: latex.to_string(),
            is_block,
            source_order,
            offset: 0,
        }
    }

    fn echo_renderer() -> FnRenderer<impl Fn(&str, bool) -> crate::render::RenderResult + Send + Sync> {
        FnRenderer::new(|latex: &str, _display: bool| {
            Ok(format!(
                "<math><semantics><mrow><mi>{0}</mi></mrow><annotation>{0}</annotation></semantics></math>",
                latex
            ))
        })
    }

    #[test]
    fn test_normalize_echo() {
        let fragment = normalize(&span("x^2", false, 3), &echo_renderer()).unwrap();
        assert_eq!(fragment.serialized_markup, "<math><mi>x^2</mi></math>");
        assert_eq!(fragment.source_order, 3);
    }

    #[test]
    fn test_display_mode_forwarded() {
        let renderer = FnRenderer::new(|latex: &str, display: bool| {
            let mode = if display { "block" } else { "inline" };
            Ok(format!(r#"<math display="{}"><mi>{}</mi></math>"#, mode, latex))
        });
        let inline = normalize(&span("a", false, 0), &renderer).unwrap();
        let block = normalize(&span("a", true, 1), &renderer).unwrap();
        assert_eq!(inline.serialized_markup, r#"<math display="inline"><mi>a</mi></math>"#);
        assert_eq!(block.serialized_markup, r#"<math display="block"><mi>a</mi></math>"#);
    }

    #[test]
    fn test_render_failure_reported() {
        let renderer = FnRenderer::new(|_: &str, _: bool| {
            Err(RenderError::Backend("undefined control sequence".to_string()))
        });
        let err = normalize(&span("\\foo", false, 0), &renderer).unwrap_err();
        assert_eq!(
            err,
            SpanError::Render(RenderError::Backend("undefined control sequence".to_string()))
        );
        assert!(!err.is_extraction());
    }

    #[test]
    fn test_render_panic_reported() {
        let renderer = FnRenderer::new(|_: &str, _: bool| -> crate::render::RenderResult {
            panic!("engine crashed")
        });
        let err = normalize(&span("x", true, 0), &renderer).unwrap_err();
        assert_eq!(
            err,
            SpanError::Render(RenderError::Panicked("engine crashed".to_string()))
        );
    }

    #[test]
    fn test_step_panic_becomes_span_error() {
        let result: Result<String, SpanError> = guarded(|| panic!("tree walk failed"));
        assert_eq!(
            result,
            Err(SpanError::Panicked("tree walk failed".to_string()))
        );
        assert_eq!(guarded(|| Ok::<_, SpanError>(7)), Ok(7));
    }

    #[test]
    fn test_unescaped_markup_is_failure() {
        let renderer = FnRenderer::new(|latex: &str, _: bool| {
            Ok(format!("<math><mi>{}</mi></math>", latex))
        });
        let err = normalize(&span("a < b", false, 0), &renderer).unwrap_err();
        assert!(matches!(err, SpanError::MalformedMarkup(_)));
        assert!(err.is_extraction());
    }

    #[test]
    fn test_missing_root_is_failure() {
        let renderer = FnRenderer::new(|latex: &str, _: bool| {
            Ok(format!(r#"<span class="katex-error">{}</span>"#, latex))
        });
        let err = normalize(&span("x", false, 0), &renderer).unwrap_err();
        assert_eq!(err, SpanError::NoMathRoot);
        assert!(err.is_extraction());
    }

    #[test]
    fn test_normalize_markup_katex_shape() {
        let raw = concat!(
            r#"<span class="katex"><span class="katex-mathml">"#,
            r#"<math xmlns="http://www.w3.org/1998/Math/MathML" display="block">"#,
            r#"<semantics><mrow><mi>x</mi><mo>&lt;</mo><mn>1</mn></mrow>"#,
            r#"<annotation encoding="application/x-tex">x &lt; 1</annotation>"#,
            r#"</semantics></math></span></span>"#
        );
        assert_eq!(
            normalize_markup(raw).unwrap(),
            r#"<math xmlns="http://www.w3.org/1998/Math/MathML" display="block"><mi>x</mi><mo>&lt;</mo><mn>1</mn></math>"#
        );
    }

    #[cfg(feature = "mathml")]
    #[test]
    fn test_normalize_with_latex2mathml() {
        let renderer = crate::render::MathMLRenderer::new();
        let fragment = normalize(&span("x^2", false, 0), &renderer).unwrap();
        assert!(fragment.serialized_markup.starts_with("<math"));
        assert!(fragment.serialized_markup.contains("msup"));
        assert!(fragment.serialized_markup.ends_with("</math>"));
    }
}
