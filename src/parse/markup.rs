//! Small text helpers over `scraper` elements.
//!
//! Lookups go through CSS selectors (see `static_selector!`). What selectors
//! can't express lives here: the text of an element, whether an element is
//! nothing but a label, and where a text run sits in the tree.

use scraper::{node::Text, ElementRef, Node, Selector};

use super::{Error, Result};

/// First element below `element` matching `selector`. A missing element means the
/// page is not a menu page.
pub fn require<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
    what: &str,
) -> Result<ElementRef<'a>> {
    element
        .select(selector)
        .next()
        .ok_or_else(|| Error::Structure(format!("no {what} in the page")))
}

pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

pub fn text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text runs with surrounding whitespace removed, skipping the ones that become empty.
pub fn stripped_strings<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.text().map(str::trim).filter(|s| !s.is_empty())
}

/// The element's text if a single text run is all it holds, descending through
/// single-child wrappers. Whitespace-only runs do not count as content.
pub fn immediate_text<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    let mut meaningful = element.children().filter(|child| match child.value() {
        Node::Text(text) => !text.trim().is_empty(),
        Node::Element(_) => true,
        _ => false,
    });
    let only = meaningful.next()?;
    if meaningful.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Text(text) => Some(text.trim()),
        _ => ElementRef::wrap(only).and_then(immediate_text),
    }
}

/// The first text run below `element` accepted by `pred`, with the element holding it.
pub fn find_text<'a>(
    element: ElementRef<'a>,
    pred: impl Fn(&str) -> bool,
) -> Option<(ElementRef<'a>, &'a str)> {
    element.descendants().find_map(|node| {
        let text: &str = node.value().as_text()?;
        if !pred(text) {
            return None;
        }
        let parent = node.parent().and_then(ElementRef::wrap)?;
        Some((parent, text))
    })
}

/// A detached text node, ready to be inserted into a page's tree.
pub fn text_node(text: &str) -> Node {
    Node::Text(Text { text: text.into() })
}
