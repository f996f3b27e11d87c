// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The editing surface the composer drives.
//!
//! The composer never reads ambient selection state: everything it needs
//! about the caret comes through [`EditingSurface`]. Offsets are `char`
//! offsets into the display text.

use std::ops::Range;

use crate::segment::{byte_offset, char_slice};

/// The text region the user types into, e.g. a contenteditable element.
pub trait EditingSurface {
    /// The flattened text currently shown.
    fn display_text(&self) -> String;

    fn caret_offset(&self) -> usize;

    /// The current selection. Collapsed at the caret when nothing is
    /// selected.
    fn selection_range(&self) -> Range<usize>;

    /// Replace `range` with `content` and put the caret after it.
    fn replace_range(&mut self, range: Range<usize>, content: &str);

    fn set_caret_offset(&mut self, offset: usize);
}

/// A headless surface backed by a `String`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySurface {
    text: String,
    selection: Range<usize>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface showing `text` with the caret at its end.
    pub fn with_text(text: &str) -> Self {
        let end = text.chars().count();
        Self {
            text: text.to_owned(),
            selection: end..end,
        }
    }

    /// Select `range`, clamped to the text, as a user drag would.
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.text.chars().count();
        let end = range.end.min(len);
        self.selection = range.start.min(end)..end;
    }

    pub fn selected_text(&self) -> &str {
        char_slice(&self.text, self.selection.start, self.selection.end)
    }
}

impl EditingSurface for MemorySurface {
    fn display_text(&self) -> String {
        self.text.clone()
    }

    fn caret_offset(&self) -> usize {
        self.selection.end
    }

    fn selection_range(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn replace_range(&mut self, range: Range<usize>, content: &str) {
        let len = self.text.chars().count();
        let end = range.end.min(len);
        let start = range.start.min(end);
        let from = byte_offset(&self.text, start);
        let to = byte_offset(&self.text, end);
        self.text.replace_range(from..to, content);
        let caret = start + content.chars().count();
        self.selection = caret..caret;
    }

    fn set_caret_offset(&mut self, offset: usize) {
        let caret = offset.min(self.text.chars().count());
        self.selection = caret..caret;
    }
}

/// Convert a UTF-16 code unit offset (as the DOM reports selections) into
/// a `char` offset. An offset that splits a surrogate pair rounds up.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, c) in text.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += c.len_utf16();
    }
    text.chars().count()
}

/// Convert a `char` offset into a UTF-16 code unit offset.
pub fn char_to_utf16_offset(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_range_moves_the_caret_after_the_content() {
        let mut surface = MemorySurface::with_text("Hi @al");
        surface.replace_range(3..6, "@Alice ");
        assert_eq!(surface.display_text(), "Hi @Alice ");
        assert_eq!(surface.caret_offset(), 10);
    }

    #[test]
    fn replace_range_counts_chars() {
        let mut surface = MemorySurface::with_text("\u{1F600}ab");
        surface.replace_range(1..2, "x");
        assert_eq!(surface.display_text(), "\u{1F600}xb");
        assert_eq!(surface.caret_offset(), 2);
    }

    #[test]
    fn caret_and_selection_are_clamped() {
        let mut surface = MemorySurface::with_text("abc");
        surface.set_caret_offset(10);
        assert_eq!(surface.caret_offset(), 3);
        surface.select(1..10);
        assert_eq!(surface.selection_range(), 1..3);
        assert_eq!(surface.selected_text(), "bc");
    }

    #[test]
    fn utf16_offsets_convert_both_ways() {
        let text = "a\u{1F600}b";
        assert_eq!(char_to_utf16_offset(text, 0), 0);
        assert_eq!(char_to_utf16_offset(text, 2), 3);
        assert_eq!(char_to_utf16_offset(text, 3), 4);
        assert_eq!(utf16_to_char_offset(text, 3), 2);
        assert_eq!(utf16_to_char_offset(text, 4), 3);
        assert_eq!(utf16_to_char_offset(text, 2), 2);
        assert_eq!(utf16_to_char_offset(text, 99), 3);
    }
}
