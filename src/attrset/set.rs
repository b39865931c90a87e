//! The attribute set itself: storage, mutation and rendering.
//!
//! Every mutation goes through [`AttributeSet::mutate_attribute`], which
//! dispatches on the attribute's [`AttributeKind`]:
//!
//! | Operation | List attribute                         | Bool attribute  |
//! |-----------|----------------------------------------|-----------------|
//! | `Set`     | replace with the parsed tokens         | `parse_boolean` |
//! | `Add`     | append tokens to the existing list     | `true`          |
//! | `Remove`  | drop the first match of each token     | `false`         |
//!
//! List values are always stored escaped and de-duplicated, first occurrence
//! winning. Existing entries are unescaped before a mutation and escaped again
//! afterwards, so repeated mutations never double-encode.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{AttrError, Result};
use crate::escape::{escape, unescape};
use crate::kind::{kind_of, parse_boolean, AttributeKind};
use crate::value::{AttrInput, AttrValue};

/// The attribute that `add_class`, `remove_class` and `has_class` work on.
pub const CLASS: &str = "class";

/// How a mutation combines new tokens with the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Set,
}

/// An ordered set of HTML attributes.
///
/// Attributes render in the order they were first set; setting an attribute
/// again changes its value but not its position.
///
/// ```
/// use attrset::AttributeSet;
///
/// let mut attrs = AttributeSet::new();
/// attrs
///     .set_attribute("title", "a < b")
///     .add_class("card card--wide")
///     .set_attribute("disabled", true);
///
/// assert_eq!(
///     attrs.to_string(),
///     r#" title="a &lt; b" class="card card--wide" disabled"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attributes: IndexMap<String, AttrValue>,
}

impl AttributeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a JSON object, applying each entry in document order.
    pub fn from_json(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(AttrError::NotAnObject(json_kind(&other))),
        }
    }

    /// Load a set from a JSON file (see [`AttributeSet::from_json`]).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(AttrError::Io)?;
        Self::from_json(&content)
    }

    /// Replace an attribute's value entirely.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<AttrInput>) -> &mut Self {
        self.mutate_attribute(name, Operation::Set, value)
    }

    /// Property-style alias of [`AttributeSet::set_attribute`].
    pub fn set(&mut self, name: &str, value: impl Into<AttrInput>) -> &mut Self {
        self.set_attribute(name, value)
    }

    /// Add one or more classes, ignoring those already present.
    pub fn add_class(&mut self, classes: impl Into<AttrInput>) -> &mut Self {
        self.mutate_attribute(CLASS, Operation::Add, classes)
    }

    /// Remove one or more classes. Classes that are not present are ignored.
    pub fn remove_class(&mut self, classes: impl Into<AttrInput>) -> &mut Self {
        self.mutate_attribute(CLASS, Operation::Remove, classes)
    }

    /// Apply `op` to the attribute `name`.
    ///
    /// This is the engine behind every other mutation and works for any
    /// attribute name, not only `class`.
    pub fn mutate_attribute(
        &mut self,
        name: &str,
        op: Operation,
        value: impl Into<AttrInput>,
    ) -> &mut Self {
        let input = value.into();
        let kind = kind_of(name);
        debug!(attribute = name, operation = ?op, kind = ?kind, "mutating attribute");

        let stored = match kind {
            AttributeKind::Bool => AttrValue::Bool(match op {
                Operation::Add => true,
                Operation::Remove => false,
                Operation::Set => parse_boolean(&input),
            }),
            AttributeKind::List => AttrValue::List(self.mutated_list(name, op, &input)),
        };

        self.attributes.insert(name.to_string(), stored);
        self
    }

    fn mutated_list(&self, name: &str, op: Operation, input: &AttrInput) -> Vec<String> {
        let mut values: Vec<String> = match op {
            Operation::Set => Vec::new(),
            Operation::Add | Operation::Remove => self
                .attributes
                .get(name)
                .and_then(AttrValue::as_list)
                .map(|list| list.iter().map(|v| unescape(v)).collect())
                .unwrap_or_default(),
        };

        let tokens = input.tokens();

        // A blank scalar still adds an empty token, so the attribute renders as name=""
        if op != Operation::Remove && tokens.is_empty() && !input.is_list() {
            values.push(String::new());
        }

        for token in tokens {
            match op {
                Operation::Add | Operation::Set => values.push(token),
                Operation::Remove => {
                    if let Some(pos) = values.iter().position(|v| *v == token) {
                        values.remove(pos);
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        values
            .iter()
            .map(|v| escape(v))
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }

    /// The stored value of `name`, or `None` if it was never set.
    pub fn get_attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Property-style alias of [`AttributeSet::get_attribute`].
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.get_attribute(name)
    }

    /// Whether the literal class `name` is present.
    ///
    /// Returns `false` when no class was ever set.
    pub fn has_class(&self, name: &str) -> bool {
        let needle = escape(name);
        self.get_attribute(CLASS)
            .and_then(AttrValue::as_list)
            .is_some_and(|classes| classes.iter().any(|c| *c == needle))
    }

    /// Iterate over stored attributes in render order, including ones that
    /// would not render (false booleans, empty lists).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored attributes, rendered or not.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether no attribute was ever set.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        trace!(attributes = self.attributes.len(), "rendering attributes");
        for (name, value) in self.attributes.iter().filter(|(_, v)| v.is_truthy()) {
            match value {
                AttrValue::Bool(_) => write!(f, " {}", name)?,
                AttrValue::List(tokens) => write!(f, " {}=\"{}\"", name, tokens.join(" "))?,
            }
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: Into<AttrInput>> Extend<(K, V)> for AttributeSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set_attribute(name.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V: Into<AttrInput>> FromIterator<(K, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        set.extend(iter);
        set
    }
}

/// Serializes literal (unescaped) values, so the output deserializes back into
/// an equal set. A lone empty token is written as `""`, which sets the
/// attribute back to a blank value.
impl Serialize for AttributeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len()))?;
        for (name, value) in &self.attributes {
            match value {
                AttrValue::Bool(b) => map.serialize_entry(name, b)?,
                AttrValue::List(tokens) if tokens.len() == 1 && tokens[0].is_empty() => {
                    map.serialize_entry(name, "")?
                }
                AttrValue::List(tokens) => {
                    let literal: Vec<String> = tokens.iter().map(|t| unescape(t)).collect();
                    map.serialize_entry(name, &literal)?
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IndexMap::<String, AttrInput>::deserialize(deserializer).map(|map| map.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list<'a>(set: &'a AttributeSet, name: &str) -> &'a [String] {
        set.get(name)
            .and_then(AttrValue::as_list)
            .expect("expected a list attribute")
    }

    #[test]
    fn new_set_is_empty() {
        let set = AttributeSet::new();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "");
        assert_eq!(set.get("class"), None);
    }

    #[test]
    fn set_splits_text_into_tokens() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", "a b");
        assert_eq!(list(&set, "class"), ["a", "b"]);
    }

    #[test]
    fn set_accepts_lists() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", vec!["a"]);
        assert_eq!(list(&set, "class"), ["a"]);
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", "a").set_attribute("class", "b");
        assert_eq!(list(&set, "class"), ["b"]);
    }

    #[test]
    fn set_deduplicates_keeping_first_occurrence() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", "b a b c a");
        assert_eq!(list(&set, "class"), ["b", "a", "c"]);
    }

    #[test]
    fn set_blank_text_renders_empty_value() {
        let mut set = AttributeSet::new();
        set.set_attribute("alt", "");
        assert_eq!(list(&set, "alt"), [""]);
        assert_eq!(set.to_string(), r#" alt="""#);
    }

    #[test]
    fn set_empty_list_clears_and_hides() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", "a")
            .set_attribute("class", Vec::<String>::new());
        assert!(list(&set, "class").is_empty());
        assert_eq!(set.to_string(), "");
    }

    #[test]
    fn set_escapes_reserved_characters() {
        let mut set = AttributeSet::new();
        set.set_attribute("title", "a < b");
        assert_eq!(list(&set, "title"), ["a", "&lt;", "b"]);
        assert_eq!(set.to_string(), r#" title="a &lt; b""#);
    }

    #[test]
    fn add_class_is_idempotent() {
        let mut set = AttributeSet::new();
        set.add_class("a").add_class("a");
        assert_eq!(list(&set, "class"), ["a"]);
    }

    #[test]
    fn add_class_appends_after_existing() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", "a b").add_class("c a");
        assert_eq!(list(&set, "class"), ["a", "b", "c"]);
    }

    #[test]
    fn remove_missing_class_is_noop() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", ["a"]).remove_class("x");
        assert_eq!(list(&set, "class"), ["a"]);
    }

    #[test]
    fn remove_class_drops_each_token() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", "a b c").remove_class(["a", "c"]);
        assert_eq!(list(&set, "class"), ["b"]);
    }

    #[test]
    fn add_blank_class_renders_empty_value() {
        let mut set = AttributeSet::new();
        set.add_class("");
        assert_eq!(list(&set, "class"), [""]);
        assert_eq!(set.to_string(), r#" class="""#);

        set.add_class("").add_class("a");
        assert_eq!(list(&set, "class"), ["", "a"]);
    }

    #[test]
    fn remove_blank_class_is_noop() {
        let mut set = AttributeSet::new();
        set.add_class("a").remove_class("");
        assert_eq!(list(&set, "class"), ["a"]);
    }

    #[test]
    fn remove_class_on_unset_leaves_empty_list() {
        let mut set = AttributeSet::new();
        set.remove_class("x");
        assert!(list(&set, "class").is_empty());
        assert_eq!(set.to_string(), "");
    }

    #[test]
    fn mutations_do_not_double_escape_existing_values() {
        let mut set = AttributeSet::new();
        set.set_attribute("class", "a&b").add_class("c").add_class("d");
        assert_eq!(list(&set, "class"), ["a&amp;b", "c", "d"]);
    }

    #[test]
    fn remove_class_matches_escaped_values() {
        let mut set = AttributeSet::new();
        set.add_class("x<y z").remove_class("x<y");
        assert_eq!(list(&set, "class"), ["z"]);
    }

    #[test]
    fn generic_mutation_works_for_any_list_attribute() {
        let mut set = AttributeSet::new();
        set.mutate_attribute("rel", Operation::Add, "noopener")
            .mutate_attribute("rel", Operation::Add, "noreferrer noopener")
            .mutate_attribute("rel", Operation::Remove, "noopener");
        assert_eq!(list(&set, "rel"), ["noreferrer"]);
    }

    #[test]
    fn boolean_set_parses_input() {
        let mut set = AttributeSet::new();
        set.set_attribute("checked", "false")
            .set_attribute("selected", "yes")
            .set_attribute("disabled", 0);
        assert_eq!(set.get("checked"), Some(&AttrValue::Bool(false)));
        assert_eq!(set.get("selected"), Some(&AttrValue::Bool(true)));
        assert_eq!(set.get("disabled"), Some(&AttrValue::Bool(false)));
    }

    #[test]
    fn boolean_add_and_remove() {
        let mut set = AttributeSet::new();
        set.mutate_attribute("open", Operation::Add, AttrInput::Null);
        assert_eq!(set.get("open"), Some(&AttrValue::Bool(true)));
        set.mutate_attribute("open", Operation::Remove, true);
        assert_eq!(set.get("open"), Some(&AttrValue::Bool(false)));
    }

    #[test]
    fn boolean_kind_never_changes() {
        let mut set = AttributeSet::new();
        set.set_attribute("checked", vec!["a", "b"]);
        assert_eq!(set.get("checked"), Some(&AttrValue::Bool(true)));
    }

    #[test]
    fn false_booleans_are_not_rendered() {
        let set: AttributeSet = [("selected", true), ("checked", false)]
            .into_iter()
            .collect();
        assert_eq!(set.get("checked"), Some(&AttrValue::Bool(false)));
        assert_eq!(set.to_string(), " selected");
    }

    #[test]
    fn render_keeps_first_set_order() {
        let mut set = AttributeSet::new();
        set.set_attribute("id", "main")
            .set_attribute("class", "a")
            .set_attribute("id", "other");
        assert_eq!(set.to_string(), r#" id="other" class="a""#);
    }

    #[test]
    fn has_class_checks_literal_names() {
        let mut set = AttributeSet::new();
        set.add_class("a x<y");
        assert!(set.has_class("a"));
        assert!(set.has_class("x<y"));
        assert!(!set.has_class("x&lt;y"));
        assert!(!set.has_class("b"));
    }

    #[test]
    fn has_class_without_class_is_false() {
        let set = AttributeSet::new();
        assert!(!set.has_class("a"));
    }

    #[test]
    fn get_unset_attribute_is_none() {
        let mut set = AttributeSet::new();
        set.set_attribute("id", "x");
        assert_eq!(set.get_attribute("title"), None);
    }

    #[test]
    fn set_alias_matches_set_attribute() {
        let mut a = AttributeSet::new();
        let mut b = AttributeSet::new();
        a.set("class", "x y");
        b.set_attribute("class", "x y");
        assert_eq!(a, b);
    }

    #[test]
    fn iter_includes_hidden_attributes() {
        let set: AttributeSet = [("checked", AttrInput::Bool(false)), ("id", "x".into())]
            .into_iter()
            .collect();
        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["checked", "id"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn from_json_applies_entries_in_document_order() {
        let set = AttributeSet::from_json(r#"{"title": "t", "class": ["a", "b"], "async": "true"}"#)
            .unwrap();
        assert_eq!(set.to_string(), r#" title="t" class="a b" async"#);
    }

    #[test]
    fn from_json_rejects_non_objects() {
        let err = AttributeSet::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, AttrError::NotAnObject("an array")));
    }

    #[test]
    fn from_json_reports_malformed_input() {
        let err = AttributeSet::from_json("{").unwrap_err();
        assert!(matches!(err, AttrError::Serialization(_)));
    }

    #[test]
    fn serialize_writes_literal_values() {
        let mut set = AttributeSet::new();
        set.set_attribute("title", "fish & chips");
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"title":["fish","&","chips"]}"#);
        let back: AttributeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn serialize_keeps_blank_values() {
        let mut set = AttributeSet::new();
        set.set_attribute("alt", "").add_class("a");
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"alt":"","class":["a"]}"#);
        let back: AttributeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert_eq!(back.to_string(), r#" alt="" class="a""#);
    }

    #[test]
    fn integers_render_exactly() {
        let mut set = AttributeSet::new();
        set.set_attribute("data-id", u64::MAX);
        assert_eq!(set.to_string(), r#" data-id="18446744073709551615""#);

        let set = AttributeSet::from_json(r#"{"data-id": 9007199254740993}"#).unwrap();
        assert_eq!(set.to_string(), r#" data-id="9007199254740993""#);
    }

    #[test]
    fn serde_round_trip_preserves_rendering() {
        let mut set = AttributeSet::new();
        set.set_attribute("title", "x").add_class("b a").set_attribute("muted", true);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"title":["x"],"class":["b","a"],"muted":true}"#);
        let back: AttributeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), set.to_string());
    }
}
