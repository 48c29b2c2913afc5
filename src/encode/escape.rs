//! Release-character escaping and field truncation.

use crate::core::Charset;

/// Element separator.
pub const ELEMENT_SEP: char = '+';
/// Composite (component) separator.
pub const COMPONENT_SEP: char = ':';
/// Segment terminator.
pub const TERMINATOR: char = '\'';
/// Release (escape) character.
pub const RELEASE: char = '?';

/// Escape data text for inclusion in a segment.
///
/// Control characters (0–31, 127) are dropped silently. The three
/// structural delimiters and the release character itself are prefixed
/// with the release character. For UNOA/UNOB a literal `.` becomes `,`
/// — applied to all escaped text, not only numbers, matching the
/// established output downstream consumers rely on.
pub fn escape(text: &str, charset: Charset) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            c if c.is_ascii_control() => {}
            ELEMENT_SEP | COMPONENT_SEP | TERMINATOR | RELEASE => {
                out.push(RELEASE);
                out.push(ch);
            }
            '.' if charset.decimal_comma() => out.push(','),
            _ => out.push(ch),
        }
    }
    out
}

/// Truncate free text to `max` characters, respecting char boundaries.
/// Structured identifiers are never passed through here.
pub fn truncate_field(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_delimiters() {
        assert_eq!(escape("a+b", Charset::Unoc), "a?+b");
        assert_eq!(escape("a:b'c?d", Charset::Unoc), "a?:b?'c??d");
    }

    #[test]
    fn drops_control_characters() {
        assert_eq!(escape("a\x00b\nc\x7f", Charset::Unoc), "abc");
    }

    #[test]
    fn period_becomes_comma_for_unoa_unob() {
        assert_eq!(escape("v1.2", Charset::Unoa), "v1,2");
        assert_eq!(escape("v1.2", Charset::Unob), "v1,2");
        assert_eq!(escape("v1.2", Charset::Unoc), "v1.2");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(truncate_field("hello", 3), "hel");
        assert_eq!(truncate_field("äöüß", 2), "äö");
    }
}
