//! Conversion between XML documents and `serde_json::Value` trees.
//!
//! Reading follows the usual XML-to-array rules: an element with child elements
//! becomes a map, repeated sibling names become a list, and a leaf element
//! becomes its (trimmed) text. Attributes are ignored, except the `t` type
//! annotation that [`write_document`] puts on every element it writes, so a
//! tree written by this module reads back unchanged.

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Number, Value};
use thiserror::Error;

const TYPE_ATTRIBUTE: &[u8] = b"t";
const LIST_ITEM: &str = "item";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("Malformed XML")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML attribute")]
    Attribute(#[from] AttrError),

    #[error("Failed to write XML")]
    Write(#[from] std::io::Error),

    #[error("XML document has no root element")]
    NoRoot,

    #[error("XML element '{0}' is not closed")]
    Unclosed(String),

    #[error("Unexpected closing tag")]
    UnexpectedEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeHint {
    String,
    Number,
    Bool,
    Null,
    List,
    Map,
}

impl TypeHint {
    fn from_attribute(value: &[u8]) -> Option<Self> {
        match value {
            b"string" => Some(TypeHint::String),
            b"number" => Some(TypeHint::Number),
            b"bool" => Some(TypeHint::Bool),
            b"null" => Some(TypeHint::Null),
            b"list" => Some(TypeHint::List),
            b"map" => Some(TypeHint::Map),
            _ => None,
        }
    }

    fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeHint::Null,
            Value::Bool(_) => TypeHint::Bool,
            Value::Number(_) => TypeHint::Number,
            Value::String(_) => TypeHint::String,
            Value::Array(_) => TypeHint::List,
            Value::Object(_) => TypeHint::Map,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            TypeHint::String => "string",
            TypeHint::Number => "number",
            TypeHint::Bool => "bool",
            TypeHint::Null => "null",
            TypeHint::List => "list",
            TypeHint::Map => "map",
        }
    }
}

struct Frame {
    name: String,
    hint: Option<TypeHint>,
    children: Vec<(String, Value)>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut hint = None;
        for attribute in start.attributes() {
            let attribute = attribute?;
            if attribute.key.as_ref() == TYPE_ATTRIBUTE {
                hint = TypeHint::from_attribute(&attribute.value);
            }
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            hint,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let value = match self.hint {
            Some(TypeHint::String) => Value::String(self.text),
            Some(TypeHint::Number) => serde_json::from_str::<Number>(self.text.trim())
                .map(Value::Number)
                .unwrap_or(Value::String(self.text)),
            Some(TypeHint::Bool) => Value::Bool(self.text.trim() == "true"),
            Some(TypeHint::Null) => Value::Null,
            Some(TypeHint::List) => {
                Value::Array(self.children.into_iter().map(|(_, value)| value).collect())
            }
            Some(TypeHint::Map) => Value::Object(self.children.into_iter().collect()),
            None if self.children.is_empty() => Value::String(self.text.trim().to_string()),
            None => Value::Object(group_children(self.children)),
        };
        (self.name, value)
    }
}

/// Children sharing a name are collected into a list, in document order.
fn group_children(children: Vec<(String, Value)>) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in children {
        match map.get_mut(&name) {
            None => {
                map.insert(name, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    map
}

/// Reads an XML document into its root element name and value.
pub(crate) fn read_document(bytes: &[u8]) -> Result<(String, Value), XmlError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root = None;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start)?.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or(XmlError::UnexpectedEnd)?;
                let (name, value) = frame.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(frame) = stack.pop() {
        return Err(XmlError::Unclosed(frame.name));
    }
    root.ok_or(XmlError::NoRoot)
}

fn attach(stack: &mut [Frame], root: &mut Option<(String, Value)>, name: String, value: Value) {
    match stack.last_mut() {
        Some(parent) => parent.children.push((name, value)),
        None => {
            if root.is_none() {
                *root = Some((name, value));
            }
        }
    }
}

/// Writes `value` as an XML document with root element `root`, annotating
/// every element with its JSON type.
pub(crate) fn write_document(root: &str, value: &Value) -> Result<Vec<u8>, XmlError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root, value)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), XmlError> {
    let mut start = BytesStart::new(name);
    start.push_attribute(("t", TypeHint::of(value).as_str()));

    match value {
        Value::Null => {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        Value::Bool(b) => write_text(writer, start, &b.to_string())?,
        Value::Number(n) => write_text(writer, start, &n.to_string())?,
        Value::String(s) => write_text(writer, start, s)?,
        Value::Array(items) => {
            writer.write_event(Event::Start(start))?;
            for item in items {
                write_element(writer, LIST_ITEM, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        Value::Object(map) => {
            writer.write_event(Event::Start(start))?;
            for (key, item) in map {
                write_element(writer, key, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }
    Ok(())
}

fn write_text(writer: &mut Writer<Vec<u8>>, start: BytesStart<'_>, text: &str) -> Result<(), XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
