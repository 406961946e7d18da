//! Parsing and serialization of MathML element trees.

use crate::ast::{Element, MathNode};
use crate::error::SpanError;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse the first complete element of `markup` into a tree.
///
/// Parsing stops at the end tag that closes the first element, so trailing
/// content is ignored. Whitespace-only text is dropped, entity references are
/// decoded, comments and processing instructions are skipped.
pub fn parse_element(markup: &str) -> Result<Element, SpanError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => stack.push(start_element(e)?),
            Ok(Event::Empty(ref e)) => {
                let element = start_element(e)?;
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(root);
                }
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without matching opening tag"))?;
                if let Some(root) = attach(&mut stack, element) {
                    return Ok(root);
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| malformed(err.to_string()))?;
                push_text(&mut stack, &text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut stack, &text);
            }
            Ok(Event::Eof) => return Err(malformed("unexpected end of input")),
            Ok(_) => {}
            Err(err) => return Err(malformed(err.to_string())),
        }
    }
}

fn start_element(start: &BytesStart) -> Result<Element, SpanError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));

    for attr in start.attributes() {
        let attr = attr.map_err(|err| malformed(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| malformed(err.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

/// Attach a finished element to its parent. Returns it when it is the root.
fn attach(stack: &mut [Element], element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(MathNode::Element(element));
            None
        }
        None => Some(element),
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    // Text outside the root element is not part of the tree
    let Some(parent) = stack.last_mut() else {
        return;
    };
    match parent.children.last_mut() {
        Some(MathNode::Text(existing)) => existing.push_str(text),
        _ => parent.children.push(MathNode::Text(text.to_string())),
    }
}

fn malformed(message: impl Into<String>) -> SpanError {
    SpanError::MalformedMarkup(message.into())
}

/// Serialize a tree back to markup.
///
/// Attributes and children are written in tree order with no added
/// whitespace; childless elements are self-closing.
pub fn serialize(root: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, root);
    out
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            MathNode::Element(e) => write_element(out, e),
            MathNode::Text(text) => out.push_str(&partial_escape(text.as_str())),
        }
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested() {
        let root = parse_element("<math><mrow><mi>x</mi><mo>+</mo></mrow></math>").unwrap();
        assert_eq!(root.name, "math");
        assert_eq!(root.children.len(), 1);
        let row = root.children[0].as_element().unwrap();
        assert_eq!(row.name, "mrow");
        assert_eq!(row.children.len(), 2);
        assert_eq!(
            row.children[0],
            MathNode::Element(Element {
                name: "mi".to_string(),
                attributes: vec![],
                children: vec![MathNode::Text("x".to_string())],
            })
        );
    }

    #[test]
    fn test_parse_stops_after_root() {
        let root = parse_element("<math><mi>a</mi></math></span><p>trailing").unwrap();
        assert_eq!(serialize(&root), "<math><mi>a</mi></math>");
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let root = parse_element(
            r#"<math xmlns="http://www.w3.org/1998/Math/MathML" display="block"><mi>x</mi></math>"#,
        )
        .unwrap();
        assert_eq!(
            root.attributes,
            vec![
                (
                    "xmlns".to_string(),
                    "http://www.w3.org/1998/Math/MathML".to_string()
                ),
                ("display".to_string(), "block".to_string()),
            ]
        );
        assert_eq!(root.attribute("display"), Some("block"));
    }

    #[test]
    fn test_whitespace_between_elements_dropped() {
        let root = parse_element("<math>\n  <mrow>\n    <mi>x</mi>\n  </mrow>\n</math>").unwrap();
        assert_eq!(serialize(&root), "<math><mrow><mi>x</mi></mrow></math>");
    }

    #[test]
    fn test_entities_round_trip() {
        let root = parse_element("<math><mo>&lt;</mo><mi>&#x3B1;</mi><mtext>a &amp; b</mtext></math>")
            .unwrap();
        assert_eq!(
            serialize(&root),
            "<math><mo>&lt;</mo><mi>\u{3B1}</mi><mtext>a &amp; b</mtext></math>"
        );
    }

    #[test]
    fn test_empty_elements_self_close() {
        let root = parse_element(r#"<math><mspace width="1em"/><mi></mi></math>"#).unwrap();
        assert_eq!(serialize(&root), r#"<math><mspace width="1em"/><mi/></math>"#);
    }

    #[test]
    fn test_comments_skipped_and_cdata_kept() {
        let root = parse_element("<math><!-- note --><mtext><![CDATA[a<b]]></mtext></math>").unwrap();
        assert_eq!(serialize(&root), "<math><mtext>a&lt;b</mtext></math>");
    }

    #[test]
    fn test_attribute_quotes_escaped() {
        let mut root = Element::new("math");
        root.attributes.push(("alttext".to_string(), "say \"hi\"".to_string()));
        root.children.push(MathNode::Text("x".to_string()));
        assert_eq!(
            serialize(&root),
            "<math alttext=\"say &quot;hi&quot;\">x</math>"
        );
    }

    #[test]
    fn test_unclosed_root_is_malformed() {
        assert!(matches!(
            parse_element("<math><mi>x</mi>"),
            Err(SpanError::MalformedMarkup(_))
        ));
    }

    #[test]
    fn test_mismatched_end_tag_is_malformed() {
        assert!(matches!(
            parse_element("<math><mi>x</mo></math>"),
            Err(SpanError::MalformedMarkup(_))
        ));
    }
}
