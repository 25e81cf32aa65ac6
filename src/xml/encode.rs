use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use super::{Args, Field};
use crate::error::EncodeError;

/// Root element of every request document.
const REQUEST_ROOT: &str = "request";

/// Assembles the request envelope: `function` and `api_id` first, then the
/// caller's arguments.
///
/// Arguments are merged in afterwards, so an argument named `function` or
/// `api_id` replaces the reserved value. The service's other clients send
/// exactly this, so we leave it be.
pub fn envelope(method: &str, api_id: &str, args: &Args) -> Args {
    let mut fields = Args::with_capacity(args.len() + 2);
    fields.insert("function".to_string(), Field::from(method));
    fields.insert("api_id".to_string(), Field::from(api_id));

    for (key, value) in args {
        fields.insert(key.clone(), value.clone());
    }

    fields
}

/// Builds the complete `<request>` document for a method call.
pub fn encode(method: &str, api_id: &str, args: &Args) -> Result<String, EncodeError> {
    write_document(REQUEST_ROOT, &envelope(method, api_id, args))
}

/// Writes `fields` as the children of a single `root` element,
/// preceded by an XML declaration.
pub fn write_document(root: &str, fields: &Args) -> Result<String, EncodeError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(encode_error)?;

    write_field(&mut writer, root, &Field::Group(fields.clone()))?;

    String::from_utf8(writer.into_inner()).map_err(encode_error)
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, field: &Field) -> Result<(), EncodeError> {
    if !is_valid_name(name) {
        return Err(EncodeError(format!("illegal element name {name:?}")));
    }

    match field {
        Field::Null => writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(encode_error)?,
        Field::Text(text) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(encode_error)?;
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(encode_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(encode_error)?;
        }
        Field::Group(fields) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(encode_error)?;
            for (key, value) in fields {
                write_field(writer, key, value)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(encode_error)?;
        }
        // Lists have no element of their own: each item is a sibling
        // carrying the list's name.
        Field::List(items) => {
            for item in items {
                write_field(writer, name, item)?;
            }
        }
    }

    Ok(())
}

/// A conservative subset of XML names: what the service actually uses.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn encode_error<E: std::fmt::Display>(error: E) -> EncodeError {
    EncodeError(error.to_string())
}
