//! Locate the `<math>` root inside raw renderer output.

use super::tree::parse_element;
use crate::ast::Element;
use crate::error::SpanError;

/// Extract the first well-formed `<math>` element from renderer output.
///
/// Renderers may wrap the element in other markup (`<span class="katex">`,
/// HTML fallbacks, ...). Each `<math` start tag is tried in order; the first
/// that parses into a complete element wins.
pub fn extract_math_root(raw: &str) -> Result<Element, SpanError> {
    let mut last_error = None;

    for start in math_start_tags(raw) {
        match parse_element(&raw[start..]) {
            Ok(root) => return Ok(root),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or(SpanError::NoMathRoot))
}

/// Byte offsets of every `<math` or `<prefix:math` start tag.
fn math_start_tags(raw: &str) -> impl Iterator<Item = usize> + '_ {
    raw.match_indices('<')
        .map(|(i, _)| i)
        .filter(move |&i| is_math_start_tag(&raw[i + 1..]))
}

fn is_math_start_tag(after_lt: &str) -> bool {
    let Some(name_end) = after_lt.find(|c: char| c.is_whitespace() || c == '>' || c == '/') else {
        return false;
    };
    let name = &after_lt[..name_end];
    let local = name.rsplit_once(':').map_or(name, |(_, local)| local);
    local == "math"
}
