//! Attribute kinds and the boolean-attribute registry.
//!
//! Whether an attribute holds a token list or a boolean depends only on its
//! name. The names listed in [`BOOLEAN_ATTRIBUTES`] are the HTML attributes
//! whose mere presence carries meaning; every other name holds a list.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::value::AttrInput;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Presence-only attribute (e.g. `disabled`)
    Bool,

    /// Space-delimited token list (e.g. `class`, `title`)
    List,
}

/// Well-known HTML boolean attributes.
///
/// Matching is exact and case-sensitive.
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];

static BOOLEAN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| BOOLEAN_ATTRIBUTES.iter().copied().collect());

/// Whether `name` is one of the boolean attributes.
pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_SET.contains(name)
}

/// Look up the kind of value stored under `name`.
pub fn kind_of(name: &str) -> AttributeKind {
    if is_boolean_attribute(name) {
        AttributeKind::Bool
    } else {
        AttributeKind::List
    }
}

/// Interpret an arbitrary input as a boolean attribute value.
///
/// - `Bool`: returned as-is
/// - `Null`: false
/// - `Integer`: false for zero
/// - `Number`: false for zero and NaN
/// - `Text`: false when empty or `"false"` in any case
/// - `List`: false when empty
pub fn parse_boolean(value: &AttrInput) -> bool {
    match value {
        AttrInput::Bool(b) => *b,
        AttrInput::Null => false,
        AttrInput::Integer(n) => *n != 0,
        AttrInput::Number(n) => *n != 0.0 && !n.is_nan(),
        AttrInput::Text(s) => !(s.is_empty() || s.eq_ignore_ascii_case("false")),
        AttrInput::List(items) => !items.is_empty(),
    }
}
