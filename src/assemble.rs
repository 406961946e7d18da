//! Batch assembly of normalized fragments.
//!
//! Scans a document once, normalizes every span independently and joins the
//! successful fragments with a blank line, in source order. Failed spans are
//! left out of the output but returned (and logged) for diagnostics.

use crate::ast::{MathSpan, NormalizedFragment, SpanFailure};
use crate::config::ExtractConfig;
use crate::error::SpanError;
use crate::normalize::normalize;
use crate::render::MathRenderer;
use crate::scanner::scan_with_config;
use rayon::prelude::*;

/// Output when a document yields no usable math.
pub const NO_MATH_SENTINEL: &str = "No mathematical content detected.";

/// Separator placed between consecutive fragments.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// The result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    /// Joined fragments, or the sentinel when there are none.
    pub output: String,
    /// Successful fragments in source order.
    pub fragments: Vec<NormalizedFragment>,
    /// Spans that could not be normalized, in source order.
    pub failures: Vec<SpanFailure>,
    /// Number of spans the scanner found.
    pub span_count: usize,
}

impl Assembly {
    /// True when at least one fragment made it into the output.
    pub fn found_math(&self) -> bool {
        !self.fragments.is_empty()
    }
}

/// Assemble a document with the default configuration.
pub fn assemble<R>(text: &str, renderer: &R) -> Assembly
where
    R: MathRenderer + ?Sized,
{
    assemble_with_config(text, renderer, &ExtractConfig::default())
}

/// Assemble a document.
pub fn assemble_with_config<R>(text: &str, renderer: &R, config: &ExtractConfig) -> Assembly
where
    R: MathRenderer + ?Sized,
{
    let spans = scan_with_config(text, &config.scan);

    // Indexed collect keeps source order in both modes
    let outcomes: Vec<Outcome> = if config.parallel {
        spans
            .par_iter()
            .map(|span| (span, normalize(span, renderer)))
            .collect()
    } else {
        spans.iter().map(|span| (span, normalize(span, renderer))).collect()
    };

    let mut fragments = Vec::new();
    let mut failures = Vec::new();

    for (span, outcome) in outcomes {
        match outcome {
            Ok(fragment) => {
                tracing::debug!(order = span.source_order, block = span.is_block, "normalized math span");
                fragments.push(fragment);
            }
            Err(error) => {
                tracing::warn!(
                    order = span.source_order,
                    offset = span.offset,
                    block = span.is_block,
                    "skipping math span: {}",
                    error
                );
                failures.push(SpanFailure::new(span, error));
            }
        }
    }

    let output = if fragments.is_empty() {
        tracing::info!(
            spans = spans.len(),
            failed = failures.len(),
            "no mathematical content produced"
        );
        if config.sentinel.is_empty() {
            NO_MATH_SENTINEL.to_string()
        } else {
            config.sentinel.clone()
        }
    } else {
        fragments
            .iter()
            .map(|f| f.serialized_markup.as_str())
            .collect::<Vec<_>>()
            .join(FRAGMENT_SEPARATOR)
    };

    Assembly {
        output,
        fragments,
        failures,
        span_count: spans.len(),
    }
}

/// Assemble many documents independently, in input order.
pub fn assemble_many<'a, I, R>(documents: I, renderer: &R, config: &ExtractConfig) -> Vec<Assembly>
where
    I: IntoIterator<Item = &'a str>,
    R: MathRenderer + ?Sized,
{
    documents
        .into_iter()
        .map(|text| assemble_with_config(text, renderer, config))
        .collect()
}

type Outcome<'s> = (&'s MathSpan, Result<NormalizedFragment, SpanError>);
