//! Directional isolation for `{{bidi:...}}`.

use unicode_bidi::{BidiClass, bidi_class};

const LEFT_TO_RIGHT_ISOLATE: char = '\u{2066}';
const RIGHT_TO_LEFT_ISOLATE: char = '\u{2067}';
const POP_DIRECTIONAL_ISOLATE: char = '\u{2069}';

/// Text direction of a strongly directional character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

/// Direction of the first strongly directional character, if any.
pub fn strong_direction(text: &str) -> Option<Direction> {
    text.chars().find_map(|c| match bidi_class(c) {
        BidiClass::L => Some(Direction::LeftToRight),
        BidiClass::R | BidiClass::AL => Some(Direction::RightToLeft),
        _ => None,
    })
}

/// Wrap `text` in a directional isolate matching its first strong
/// character. Text without strong characters is returned unchanged.
///
/// # Example
///
/// ```
/// use lingo::interpreter::bidi_isolate;
///
/// assert_eq!(bidi_isolate("abc"), "\u{2066}abc\u{2069}");
/// assert_eq!(bidi_isolate("שלום"), "\u{2067}שלום\u{2069}");
/// assert_eq!(bidi_isolate("123"), "123");
/// ```
pub fn bidi_isolate(text: &str) -> String {
    let open = match strong_direction(text) {
        Some(Direction::LeftToRight) => LEFT_TO_RIGHT_ISOLATE,
        Some(Direction::RightToLeft) => RIGHT_TO_LEFT_ISOLATE,
        None => return text.to_string(),
    };
    format!("{open}{text}{POP_DIRECTIONAL_ISOLATE}")
}
