use roxmltree::{Document, Node};
use serde_json::{Map, Value};

use crate::error::DecodeError;

const ATTRIBUTES_KEY: &str = "@attributes";
const VALUE_KEY: &str = "@value";

/// Parses raw response bytes. See [`decode`].
pub fn decode_bytes(body: &[u8]) -> Result<Value, DecodeError> {
    decode(std::str::from_utf8(body)?)
}

/// Parses an XML document into `{ root_name: value }`.
///
/// Elements with children become objects keyed by child name. A name seen
/// more than once becomes an array in document order, while a name seen
/// exactly once stays a bare value. Leaf elements become their trimmed
/// text. Everything stays a string; interpreting numbers is up to the caller.
pub fn decode(xml: &str) -> Result<Value, DecodeError> {
    let document = Document::parse(xml)?;
    let root = document.root_element();

    let mut decoded = Map::new();
    decoded.insert(root.tag_name().name().to_string(), convert(root));
    Ok(Value::Object(decoded))
}

fn convert(element: Node<'_, '_>) -> Value {
    let mut children: Map<String, Value> = Map::new();
    for child in element.children().filter(Node::is_element) {
        let name = child.tag_name().name();
        let value = convert(child);

        match children.get_mut(name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                children.insert(name.to_string(), value);
            }
        }
    }

    let attributes = attributes(element);

    if children.is_empty() {
        let text = Value::String(text_of(element));
        return match attributes {
            Some(attributes) => {
                let mut leaf = Map::new();
                leaf.insert(VALUE_KEY.to_string(), text);
                leaf.insert(ATTRIBUTES_KEY.to_string(), attributes);
                Value::Object(leaf)
            }
            None => text,
        };
    }

    if let Some(attributes) = attributes {
        children.insert(ATTRIBUTES_KEY.to_string(), attributes);
    }
    Value::Object(children)
}

fn attributes(element: Node<'_, '_>) -> Option<Value> {
    let attributes: Map<String, Value> = element
        .attributes()
        .map(|attribute| {
            (
                attribute.name().to_string(),
                Value::String(attribute.value().to_string()),
            )
        })
        .collect();

    (!attributes.is_empty()).then_some(Value::Object(attributes))
}

fn text_of(element: Node<'_, '_>) -> String {
    element
        .children()
        .filter(Node::is_text)
        .filter_map(|node| node.text())
        .collect::<String>()
        .trim()
        .to_string()
}
