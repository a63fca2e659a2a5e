//! XML body decoder
//!
//! Each element becomes an entry keyed by its tag name. Repeated sibling
//! tags collapse into a [`Node::List`] at the position of the first one.
//! Attributes stay attached to their element, and the root element itself
//! is unwrapped: the document decodes to the root's children.

use std::fmt::Display;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::node::{Attributes, Node};
use crate::error::{EpornerError, Result};

/// Element under construction
struct Element {
    name: String,
    attrs: Attributes,
    children: Vec<(String, Node)>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_error)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(xml_error)?.into_owned();
            attrs.push((key, value));
        }
        Ok(Self {
            name,
            attrs,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Node) {
        let node = if !self.children.is_empty() {
            Node::Map {
                attrs: self.attrs,
                entries: group_repeated(self.children),
            }
        } else if self.attrs.is_empty() {
            Node::Leaf(self.text)
        } else {
            Node::Attributed {
                text: self.text,
                attrs: self.attrs,
            }
        };
        (self.name, node)
    }
}

fn group_repeated(children: Vec<(String, Node)>) -> Vec<(String, Node)> {
    let mut entries: Vec<(String, Node)> = Vec::new();
    for (name, node) in children {
        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, Node::List(items))) => items.push(node),
            Some((_, first)) => {
                let first_node = std::mem::take(first);
                *first = Node::List(vec![first_node, node]);
            }
            None => entries.push((name, node)),
        }
    }
    entries
}

fn xml_error(e: impl Display) -> EpornerError {
    EpornerError::Parse(format!("Failed to parse XML response: {}", e))
}

fn attach(stack: &mut [Element], root: &mut Option<Node>, (name, node): (String, Node)) {
    match stack.last_mut() {
        Some(parent) => parent.children.push((name, node)),
        None => *root = Some(node),
    }
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(xml_error("text outside of the root element")),
    }
    Ok(())
}

/// Decodes an XML document into a [`Node`]
///
/// # Errors
/// Returns `Parse` carrying the first diagnostic if the document is
/// malformed, empty, or has more than one root element
pub fn decode_xml(body: &str) -> Result<Node> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(xml_error("extra content at the end of the document"));
                }
                stack.push(Element::open(&start)?);
            }
            Ok(Event::Empty(start)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(xml_error("extra content at the end of the document"));
                }
                let element = Element::open(&start)?;
                attach(&mut stack, &mut root, element.close());
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error("closing tag without an open element"))?;
                attach(&mut stack, &mut root, element.close());
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(xml_error)?;
                push_text(&mut stack, &text)?;
            }
            Ok(Event::CData(data)) => {
                let bytes = data.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, processing instructions, doctype
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(format!("premature end of data in tag {}", open.name)));
    }

    match root {
        Some(Node::Map { entries, .. }) => Ok(Node::map(entries)),
        Some(_) => Ok(Node::empty()),
        None => Err(xml_error("document is empty")),
    }
}
