//! Converting requests to XML and responses back into plain data.
//!
//! Requests are flat-ish ordered key/value documents rooted at `<request>`.
//! Responses are decoded into [`serde_json::Value`] trees, as every method
//! answers with its own nested shape.

mod decode;
mod encode;

use indexmap::IndexMap;

pub use decode::{decode, decode_bytes};
pub use encode::{encode, envelope, write_document};

/// Ordered request arguments.
///
/// Inserting a key that already exists replaces the value in place,
/// keeping its original position.
pub type Args = IndexMap<String, Field>;

/// A single value within a request document.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Written as an empty element.
    Null,
    Text(String),
    /// A nested element holding its own fields.
    Group(Args),
    /// Repeated sibling elements, all named after the owning key.
    List(Vec<Field>),
}

impl Field {
    /// Builds a group from key/value pairs, preserving their order.
    pub fn group<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Field>,
        I: IntoIterator<Item = (K, V)>,
    {
        Field::Group(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Text(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

impl From<&String> for Field {
    fn from(value: &String) -> Self {
        Field::Text(value.clone())
    }
}

macro_rules! field_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Field {
                fn from(value: $ty) -> Self {
                    Field::Text(value.to_string())
                }
            }
        )*
    };
}

field_from_display!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Text(if value { "true" } else { "false" }.to_string())
    }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Null, Into::into)
    }
}

impl<T: Into<Field>> From<Vec<T>> for Field {
    fn from(values: Vec<T>) -> Self {
        Field::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Args> for Field {
    fn from(fields: Args) -> Self {
        Field::Group(fields)
    }
}

/// Builds [`Args`] from key/value pairs.
///
/// ```
/// use shoplogistics::{args, xml::Field};
///
/// let fields = args! { "from_city_code" => 1, "to_city_code" => None::<i64> };
/// assert_eq!(fields["to_city_code"], Field::Null);
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::xml::Args::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::xml::Args::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::xml::Field::from($value));
        )+
        fields
    }};
}
