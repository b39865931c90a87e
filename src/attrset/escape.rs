//! Escaping of reserved characters inside attribute values.
//!
//! Only five characters are reserved: `'`, `"`, `<`, `&` and `>`. Each has one
//! primary entity, which is what [`escape`] produces, and possibly further
//! aliases that [`unescape`] also understands:
//!
//! | Char | Primary  | Aliases |
//! |------|----------|---------|
//! | `'`  | `&#39;`  |         |
//! | `"`  | `&quot;` | `&#34;` |
//! | `<`  | `&lt;`   | `&#60;` |
//! | `&`  | `&amp;`  | `&#38;` |
//! | `>`  | `&gt;`   | `&#62;` |
//!
//! Both directions work in a single left-to-right pass. Text produced for one
//! character is never scanned again, so `<` always becomes `&lt;` and never
//! `&amp;lt;`.

/// Reserved characters and their entity forms. The first entry of each alias
/// list is the primary form.
pub const ENTITIES: &[(char, &[&str])] = &[
    ('\'', &["&#39;"]),
    ('"', &["&quot;", "&#34;"]),
    ('<', &["&lt;", "&#60;"]),
    ('&', &["&amp;", "&#38;"]),
    ('>', &["&gt;", "&#62;"]),
];

/// Replace every reserved character with its primary entity.
///
/// # Examples
/// ```
/// use attrset::escape::escape;
///
/// assert_eq!(escape("a < b"), "a &lt; b");
/// assert_eq!(escape(r#"say "hi" & 'bye'"#), "say &quot;hi&quot; &amp; &#39;bye&#39;");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match primary_entity(ch) {
            Some(entity) => out.push_str(entity),
            None => out.push(ch),
        }
    }
    out
}

/// Restore reserved characters from any of their known entity forms.
///
/// Unknown entities and stray ampersands are left untouched.
///
/// # Examples
/// ```
/// use attrset::escape::unescape;
///
/// assert_eq!(unescape("&quot;x&#34;"), "\"x\"");
/// assert_eq!(unescape("&nbsp;&"), "&nbsp;&");
/// ```
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match match_entity(tail) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn primary_entity(ch: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(reserved, _)| *reserved == ch)
        .map(|(_, aliases)| aliases[0])
}

/// Match an entity at the start of `text`, returning the character it stands
/// for and the entity's byte length.
fn match_entity(text: &str) -> Option<(char, usize)> {
    ENTITIES.iter().find_map(|(reserved, aliases)| {
        aliases
            .iter()
            .find(|alias| text.starts_with(**alias))
            .map(|alias| (*reserved, alias.len()))
    })
}
