use log::warn;
use serde_json::{Map, Value};
use xmltree::{Element, XMLNode};

/// Generic key-value tree produced from an ISAPI XML document.
pub type XmlValue = Value;

/// Key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "$";
/// Key holding text that sits next to child elements or attributes.
pub const TEXT_KEY: &str = "_";

/// Parses an XML response body into a [`XmlValue`].
///
/// The document becomes `{ RootName: node }`. A leaf element is its trimmed
/// text, other elements are objects keyed by child name, and repeated child
/// names collapse into an array. Unparseable input is logged and yields an
/// empty object.
///
/// ```
/// use hikio::isapi::parse_xml_response;
///
/// let tree = parse_xml_response("<DeviceInfo><model>DS-7608NI</model></DeviceInfo>");
/// assert_eq!(tree["DeviceInfo"]["model"], "DS-7608NI");
///
/// let empty = parse_xml_response("not xml");
/// assert!(empty.as_object().unwrap().is_empty());
/// ```
pub fn parse_xml_response(body: &str) -> XmlValue {
    match Element::parse(body.as_bytes()) {
        Ok(root) => {
            let mut tree = Map::new();
            tree.insert(root.name.clone(), element_to_value(&root));
            Value::Object(tree)
        }
        Err(e) => {
            warn!("Failed to parse XML response: {}", e);
            Value::Object(Map::new())
        }
    }
}

fn element_to_value(element: &Element) -> Value {
    let mut fields = Map::new();
    let mut text = String::new();

    for child in &element.children {
        match child {
            XMLNode::Element(e) => insert_child(&mut fields, &e.name, element_to_value(e)),
            XMLNode::Text(t) | XMLNode::CData(t) => text.push_str(t),
            _ => {}
        }
    }

    let text = text.trim();
    if fields.is_empty() && element.attributes.is_empty() {
        return Value::String(text.to_string());
    }

    if !element.attributes.is_empty() {
        let attributes: Map<String, Value> = element
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        fields.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    }

    if !text.is_empty() {
        fields.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }

    Value::Object(fields)
}

fn insert_child(fields: &mut Map<String, Value>, name: &str, value: Value) {
    match fields.get_mut(name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name.to_string(), value);
        }
    }
}
