//! Data model shared by the scanner, normalizer and assembler.

use crate::error::SpanError;
use std::fmt;

/// A math expression found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    /// Text between the delimiters, delimiters excluded
    pub raw_latex: String,
    /// True for `$$...$$`, false for `$...$`
    pub is_block: bool,
    /// Position of this span among all spans of the document
    pub source_order: usize,
    /// Byte offset of the opening delimiter in the source text
    pub offset: usize,
}

/// One cleaned `<math>` element, tagged with the span it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFragment {
    pub serialized_markup: String,
    pub source_order: usize,
}

/// A span that was dropped from the output, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanFailure {
    pub source_order: usize,
    pub offset: usize,
    pub raw_latex: String,
    pub is_block: bool,
    pub error: SpanError,
}

impl SpanFailure {
    pub fn new(span: &MathSpan, error: SpanError) -> Self {
        Self {
            source_order: span.source_order,
            offset: span.offset,
            raw_latex: span.raw_latex.clone(),
            is_block: span.is_block,
            error,
        }
    }
}

impl fmt::Display for SpanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delim = if self.is_block { "$$" } else { "$" };
        write!(
            f,
            "math span #{} at byte {} ({}{}{}): {}",
            self.source_order, self.offset, delim, self.raw_latex, delim, self.error
        )
    }
}

/// A node of a parsed MathML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathNode {
    Element(Element),
    Text(String),
}

impl MathNode {
    /// The element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MathNode::Element(e) => Some(e),
            MathNode::Text(_) => None,
        }
    }
}

/// A MathML element with its attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name as written (may carry a namespace prefix)
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MathNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name without any namespace prefix (`m:mrow` -> `mrow`).
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(Element::new("mrow").local_name(), "mrow");
        assert_eq!(Element::new("m:semantics").local_name(), "semantics");
    }

    #[test]
    fn test_failure_display() {
        let span = MathSpan {
            raw_latex: "\\frac{".to_string(),
            is_block: true,
            source_order: 2,
            offset: 17,
        };
        let failure = SpanFailure::new(&span, SpanError::NoMathRoot);
        assert_eq!(
            failure.to_string(),
            "math span #2 at byte 17 ($$\\frac{$$): No math root produced"
        );
    }
}
