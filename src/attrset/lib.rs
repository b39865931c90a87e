//! # Attrset
//!
//! Attrset models the attributes of a single HTML element and renders them to
//! the text that goes inside the opening tag:
//!
//! ```
//! use attrset::AttributeSet;
//!
//! let mut attrs: AttributeSet = [("class", "btn")].into_iter().collect();
//! attrs.add_class("btn--primary btn").set_attribute("disabled", "true");
//!
//! assert_eq!(format!("<button{}>", attrs), r#"<button class="btn btn--primary" disabled>"#);
//! ```
//!
//! ## Attribute Kinds
//!
//! | Kind   | Examples                       | Stored as                        |
//! |--------|--------------------------------|----------------------------------|
//! | `Bool` | `checked`, `disabled`, `open`  | `true` / `false`                 |
//! | `List` | `class`, `title`, anything else| escaped, de-duplicated tokens    |
//!
//! The kind depends only on the attribute name (see [`kind`]). Boolean
//! attributes render as a bare name when true and not at all when false; list
//! attributes render as `name="tok1 tok2"` unless the list is empty.
//!
//! ## Input Coercion
//!
//! Mutations accept anything convertible into [`AttrInput`]: text, numbers,
//! booleans, sequences, `Option`s and JSON values. Text is split on single
//! spaces, sequences are taken item by item, everything else is stringified
//! first. Boolean attributes interpret the input with
//! [`kind::parse_boolean`].
//!
//! ## Module Overview
//!
//! - [`set`]: `AttributeSet`, the mutation engine and rendering
//! - [`value`]: Input and stored value types
//! - [`kind`]: Boolean-attribute registry and boolean parsing
//! - [`escape`]: Entity escaping and unescaping
//! - [`error`]: Error types

pub mod error;
pub mod escape;
pub mod kind;
pub mod set;
pub mod value;

pub use error::{AttrError, Result};
pub use kind::AttributeKind;
pub use set::{AttributeSet, Operation};
pub use value::{AttrInput, AttrValue};
