// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Events delivered by the editing surface, named after their DOM
//! counterparts so a web host can forward `inputType` and `key` verbatim.

use std::ops::Range;
use std::str::FromStr;

use strum_macros::EnumString;

/// The DOM `InputEvent.inputType` values the composer acts on.
#[derive(Clone, Debug, PartialEq, Eq, EnumString)]
pub enum InputType {
    #[strum(serialize = "insertText")]
    InsertText,
    #[strum(serialize = "insertParagraph")]
    InsertParagraph,
    #[strum(serialize = "insertLineBreak")]
    InsertLineBreak,
    #[strum(serialize = "deleteContentBackward")]
    DeleteContentBackward,
    #[strum(serialize = "deleteContentForward")]
    DeleteContentForward,
    #[strum(serialize = "insertFromPaste")]
    InsertFromPaste,
    #[strum(default)]
    Other(String),
}

impl InputType {
    /// Parse a DOM `inputType`. Unknown names become [`InputType::Other`].
    pub fn parse(name: &str) -> Self {
        Self::from_str(name).unwrap_or_else(|_| Self::Other(name.to_owned()))
    }

    pub fn is_deletion(&self) -> bool {
        matches!(
            self,
            Self::DeleteContentBackward | Self::DeleteContentForward
        )
    }

    /// A block boundary: Enter or Shift+Enter.
    pub fn is_break(&self) -> bool {
        matches!(self, Self::InsertParagraph | Self::InsertLineBreak)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub input_type: InputType,
    /// The inserted text, for insertions that carry any.
    pub data: Option<String>,
}

impl InputEvent {
    pub fn new(input_type: InputType, data: Option<String>) -> Self {
        Self { input_type, data }
    }

    pub fn insert_text(text: impl Into<String>) -> Self {
        Self::new(InputType::InsertText, Some(text.into()))
    }

    pub fn insert_paragraph() -> Self {
        Self::new(InputType::InsertParagraph, None)
    }

    pub fn delete_backward() -> Self {
        Self::new(InputType::DeleteContentBackward, None)
    }

    pub fn delete_forward() -> Self {
        Self::new(InputType::DeleteContentForward, None)
    }
}

/// The display range an input event replaces.
///
/// A non-collapsed selection always wins. Otherwise deletions reach one
/// char back or forward from the caret, clamped to the document, and
/// insertions happen at the caret.
pub fn calculate_range(
    input_type: &InputType,
    caret: usize,
    selection: Range<usize>,
    len: usize,
) -> Range<usize> {
    if !selection.is_empty() {
        return selection;
    }
    match input_type {
        InputType::DeleteContentBackward => caret.saturating_sub(1)..caret,
        InputType::DeleteContentForward => caret..(caret + 1).min(len).max(caret),
        _ => caret..caret,
    }
}

/// The DOM `KeyboardEvent.key` values the suggestion list reacts to.
#[derive(Clone, Debug, PartialEq, Eq, EnumString)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Tab,
    Escape,
    #[strum(default)]
    Other(String),
}

impl Key {
    pub fn parse(name: &str) -> Self {
        Self::from_str(name).unwrap_or_else(|_| Self::Other(name.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl, Alt or Meta is held: a shortcut, not list navigation.
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Whether the composer acted on a key or left it to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyHandling {
    /// The host should suppress the browser default.
    Consumed,
    /// Passed on to the host's key handler.
    Forwarded,
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;

    #[test]
    fn parses_dom_input_types() {
        assert_eq!(InputType::parse("insertText"), InputType::InsertText);
        assert_eq!(InputType::parse("insertParagraph"), InputType::InsertParagraph);
        assert_eq!(
            InputType::parse("deleteContentBackward"),
            InputType::DeleteContentBackward
        );
        assert_eq!(InputType::parse("insertFromPaste"), InputType::InsertFromPaste);
        assert_eq!(
            InputType::parse("formatBold"),
            InputType::Other("formatBold".to_owned())
        );
    }

    #[test]
    fn parses_dom_keys() {
        assert_eq!(Key::parse("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::parse("Escape"), Key::Escape);
        assert_eq!(Key::parse("a"), Key::Other("a".to_owned()));
        assert_eq!(Key::parse("Backspace"), Key::Other("Backspace".to_owned()));
    }

    #[test]
    fn command_modifiers_exclude_shift() {
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        assert!(!shift.has_command());
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert!(ctrl.has_command());
    }

    #[test]
    fn classifies_input_types() {
        assert!(InputType::DeleteContentForward.is_deletion());
        assert!(!InputType::InsertText.is_deletion());
        assert!(InputType::InsertLineBreak.is_break());
        assert!(!InputType::InsertFromPaste.is_break());
    }

    #[test]
    fn selection_wins_over_caret() {
        let range = calculate_range(&InputType::DeleteContentBackward, 5, 2..4, 10);
        assert_that!(range).is_equal_to(2..4);
    }

    #[test]
    fn backward_delete_reaches_one_char_back() {
        assert_eq!(calculate_range(&InputType::DeleteContentBackward, 5, 5..5, 10), 4..5);
        assert_eq!(calculate_range(&InputType::DeleteContentBackward, 0, 0..0, 10), 0..0);
    }

    #[test]
    fn forward_delete_is_clamped_to_the_end() {
        assert_eq!(calculate_range(&InputType::DeleteContentForward, 5, 5..5, 10), 5..6);
        assert_eq!(calculate_range(&InputType::DeleteContentForward, 10, 10..10, 10), 10..10);
    }

    #[test]
    fn insertions_happen_at_the_caret() {
        assert_eq!(calculate_range(&InputType::InsertText, 3, 3..3, 10), 3..3);
    }
}
