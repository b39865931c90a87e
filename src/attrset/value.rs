//! Attribute value types.
//!
//! [`AttrInput`] is what callers hand to a mutation: a loosely typed value that
//! gets coerced according to the attribute's kind. [`AttrValue`] is what the
//! set actually stores.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Loosely typed input to a mutation.
///
/// List attributes coerce any non-list input to text and split it on single
/// spaces; boolean attributes run it through
/// [`parse_boolean`](crate::kind::parse_boolean).
#[derive(Debug, Clone, PartialEq)]
pub enum AttrInput {
    /// Absent value (JSON `null`, `None`)
    Null,

    /// Plain boolean
    Bool(bool),

    /// Integer input, kept exact
    Integer(i128),

    /// Floating-point input
    Number(f64),

    /// Text, possibly holding several space-separated tokens
    Text(String),

    /// Pre-split tokens; elements are never split further
    List(Vec<String>),
}

impl AttrInput {
    /// Coerce the input to a single piece of text.
    ///
    /// Lists join their items with commas, matching how a sequence reads when
    /// flattened to one string.
    pub fn to_text(&self) -> String {
        match self {
            AttrInput::Null => "null".to_string(),
            AttrInput::Bool(b) => b.to_string(),
            AttrInput::Integer(n) => n.to_string(),
            AttrInput::Number(n) => format_number(*n),
            AttrInput::Text(s) => s.clone(),
            AttrInput::List(items) => items.join(","),
        }
    }

    /// Split the input into candidate tokens.
    ///
    /// Empty tokens (from repeated, leading or trailing spaces, or empty list
    /// items) are dropped.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            AttrInput::List(items) => items.iter().filter(|s| !s.is_empty()).cloned().collect(),
            other => other
                .to_text()
                .split(' ')
                .filter(|token| !token.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Whether this is a pre-split list rather than a scalar.
    pub fn is_list(&self) -> bool {
        matches!(self, AttrInput::List(_))
    }
}

fn format_number(n: f64) -> String {
    if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        // f64's Display already drops a trailing ".0"
        n.to_string()
    }
}

/// Text form of a JSON value when it appears as a list item.
fn json_item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(json_item_text).collect::<Vec<_>>().join(","),
        other => AttrInput::from(other.clone()).to_text(),
    }
}

impl From<&str> for AttrInput {
    fn from(value: &str) -> Self {
        AttrInput::Text(value.to_string())
    }
}

impl From<String> for AttrInput {
    fn from(value: String) -> Self {
        AttrInput::Text(value)
    }
}

impl From<&String> for AttrInput {
    fn from(value: &String) -> Self {
        AttrInput::Text(value.clone())
    }
}

impl From<bool> for AttrInput {
    fn from(value: bool) -> Self {
        AttrInput::Bool(value)
    }
}

macro_rules! integer_inputs {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrInput {
                fn from(value: $ty) -> Self {
                    AttrInput::Integer(value as i128)
                }
            }
        )*
    };
}

integer_inputs!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f32> for AttrInput {
    fn from(value: f32) -> Self {
        AttrInput::Number(f64::from(value))
    }
}

impl From<f64> for AttrInput {
    fn from(value: f64) -> Self {
        AttrInput::Number(value)
    }
}

impl<T: ToString> From<Vec<T>> for AttrInput {
    fn from(values: Vec<T>) -> Self {
        AttrInput::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for AttrInput {
    fn from(values: &[T]) -> Self {
        AttrInput::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for AttrInput {
    fn from(values: [T; N]) -> Self {
        AttrInput::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: Into<AttrInput>> From<Option<T>> for AttrInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrInput::Null, Into::into)
    }
}

impl From<Value> for AttrInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttrInput::Null,
            Value::Bool(b) => AttrInput::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttrInput::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    AttrInput::Integer(i128::from(u))
                } else if let Some(f) = n.as_f64() {
                    AttrInput::Number(f)
                } else {
                    AttrInput::Text(n.to_string())
                }
            }
            Value::String(s) => AttrInput::Text(s),
            Value::Array(items) => AttrInput::List(items.iter().map(json_item_text).collect()),
            object @ Value::Object(_) => AttrInput::Text(object.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for AttrInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(AttrInput::from)
    }
}

/// Stored representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean attribute (e.g. `checked`)
    Bool(bool),

    /// Escaped, de-duplicated tokens (e.g. `class`)
    List(Vec<String>),
}

impl AttrValue {
    /// Check if this value should be rendered.
    ///
    /// - Bool: the boolean value itself
    /// - List: true if non-empty
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Bool(v) => *v,
            AttrValue::List(v) => !v.is_empty(),
        }
    }

    /// Get the boolean value if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            AttrValue::List(_) => None,
        }
    }

    /// Get the escaped tokens if this is a List.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(v) => Some(v),
            AttrValue::Bool(_) => None,
        }
    }
}
