//! Structural rewrites over a parsed MathML tree.
//!
//! Each rewrite consumes a tree and returns the rewritten tree. They are
//! applied in a fixed order by [`rewrite_tree`].

use crate::ast::{Element, MathNode};

/// `<annotation>` and `<annotation-xml>` carry the source notation.
pub fn is_annotation(element: &Element) -> bool {
    matches!(element.local_name(), "annotation" | "annotation-xml")
}

pub fn is_semantics(element: &Element) -> bool {
    element.local_name() == "semantics"
}

pub fn is_row(element: &Element) -> bool {
    element.local_name() == "mrow"
}

/// Remove every descendant element matching `pred`, at any depth.
pub fn strip_elements<P>(mut element: Element, pred: &P) -> Element
where
    P: Fn(&Element) -> bool,
{
    element.children = element
        .children
        .into_iter()
        .filter_map(|child| match child {
            MathNode::Element(e) if pred(&e) => None,
            MathNode::Element(e) => Some(MathNode::Element(strip_elements(e, pred))),
            text => Some(text),
        })
        .collect();
    element
}

/// Replace every descendant element matching `pred` by its children.
pub fn unwrap_elements<P>(mut element: Element, pred: &P) -> Element
where
    P: Fn(&Element) -> bool,
{
    element.children = splice_children(element.children, pred);
    element
}

fn splice_children<P>(children: Vec<MathNode>, pred: &P) -> Vec<MathNode>
where
    P: Fn(&Element) -> bool,
{
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            MathNode::Element(e) if pred(&e) => out.extend(splice_children(e.children, pred)),
            MathNode::Element(e) => out.push(MathNode::Element(unwrap_elements(e, pred))),
            text => out.push(text),
        }
    }
    out
}

/// If the root's only child is an `<mrow>`, hoist that row's children.
///
/// Applies one level only, directly under the root.
pub fn flatten_root_row(mut root: Element) -> Element {
    let sole_row = root.children.len() == 1
        && matches!(&root.children[0], MathNode::Element(e) if is_row(e));

    if sole_row {
        if let Some(MathNode::Element(row)) = root.children.pop() {
            root.children = row.children;
        }
    }
    root
}

/// Strip annotations, unwrap `<semantics>`, then flatten a top-level row.
pub fn rewrite_tree(root: Element) -> Element {
    let root = strip_elements(root, &is_annotation);
    let root = unwrap_elements(root, &is_semantics);
    flatten_root_row(root)
}
