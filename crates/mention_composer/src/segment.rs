// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The building blocks of a [`crate::Document`].
//!
//! A document is a flat run of segments. Text is freely editable, a mention
//! is an atomic chip whose rendered label can only be removed as a whole,
//! and a line break stands for one structural block boundary of the
//! editing surface.
//!
//! All lengths are counted in `char`s of the display projection.

use crate::mention_option::MentionOption;

/// A single piece of document content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Plain text. Never empty and never contains `\n` once it is part of a
    /// normalised document.
    Text(String),
    /// An atomic mention chip.
    Mention(MentionSegment),
    /// One block boundary. Projects to a single `\n` in both strings.
    LineBreak,
}

/// An atomic mention chip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionSegment {
    /// The option label, without any trigger prefix.
    pub label: String,
    /// The canonical value written into the persisted text.
    pub value: String,
    pub trigger: char,
    /// Whether the rendered label is prefixed with the trigger.
    pub keep_trigger: bool,
}

impl MentionSegment {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        trigger: char,
        keep_trigger: bool,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            trigger,
            keep_trigger,
        }
    }

    /// Build a chip for `option`, or `None` when the option is an action.
    pub fn from_option(
        option: &MentionOption,
        trigger: char,
        keep_trigger: bool,
    ) -> Option<Self> {
        option
            .value_str()
            .map(|value| Self::new(&option.label, value, trigger, keep_trigger))
    }

    /// The text the chip occupies in the display projection.
    pub fn rendered_label(&self) -> String {
        rendered_label(&self.label, self.trigger, self.keep_trigger)
    }

    pub fn display_len(&self) -> usize {
        self.label.chars().count() + usize::from(self.keep_trigger)
    }

    pub fn canonical_len(&self) -> usize {
        self.value.chars().count()
    }
}

/// `@Alice` or `Alice`, depending on `keep_trigger`.
pub fn rendered_label(label: &str, trigger: char, keep_trigger: bool) -> String {
    if keep_trigger {
        let mut rendered = String::with_capacity(label.len() + trigger.len_utf8());
        rendered.push(trigger);
        rendered.push_str(label);
        rendered
    } else {
        label.to_owned()
    }
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn mention(
        label: impl Into<String>,
        value: impl Into<String>,
        trigger: char,
        keep_trigger: bool,
    ) -> Self {
        Self::Mention(MentionSegment::new(label, value, trigger, keep_trigger))
    }

    /// Length of this segment in the display projection.
    pub fn display_len(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::Mention(mention) => mention.display_len(),
            Self::LineBreak => 1,
        }
    }

    pub fn push_display(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Mention(mention) => out.push_str(&mention.rendered_label()),
            Self::LineBreak => out.push('\n'),
        }
    }

    pub fn push_canonical(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Mention(mention) => out.push_str(&mention.value),
            Self::LineBreak => out.push('\n'),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_mention(&self) -> bool {
        matches!(self, Self::Mention(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_mention(&self) -> Option<&MentionSegment> {
        match self {
            Self::Mention(mention) => Some(mention),
            _ => None,
        }
    }
}

/// Split plain text on `\n` into alternating text and line break segments.
/// Empty text pieces are skipped; `\r\n` counts as one break.
pub fn segments_from_plain_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            segments.push(Segment::LineBreak);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            segments.push(Segment::text(line));
        }
    }
    segments
}

/// Byte index of the `char_index`th char of `s`, clamped to `s.len()`.
pub(crate) fn byte_offset(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// Number of chars in `s[..byte_index]`.
pub(crate) fn char_offset(s: &str, byte_index: usize) -> usize {
    s[..byte_index].chars().count()
}

/// `s[start..end]` with `start` and `end` counted in chars.
pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    &s[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_label_keeps_trigger_when_asked() {
        let chip = MentionSegment::new("Alice", "a1", '@', true);
        assert_eq!(chip.rendered_label(), "@Alice");
        assert_eq!(chip.display_len(), 6);
    }

    #[test]
    fn rendered_label_drops_trigger() {
        let chip = MentionSegment::new("Alice", "a1", '@', false);
        assert_eq!(chip.rendered_label(), "Alice");
        assert_eq!(chip.display_len(), 5);
        assert_eq!(chip.canonical_len(), 2);
    }

    #[test]
    fn chips_are_not_built_for_actions() {
        let option = MentionOption::action("Invite", "invite");
        assert_eq!(MentionSegment::from_option(&option, '@', true), None);
    }

    #[test]
    fn line_break_projects_to_one_newline() {
        let mut display = String::new();
        let mut canonical = String::new();
        Segment::LineBreak.push_display(&mut display);
        Segment::LineBreak.push_canonical(&mut canonical);
        assert_eq!(display, "\n");
        assert_eq!(canonical, "\n");
        assert_eq!(Segment::LineBreak.display_len(), 1);
    }

    #[test]
    fn plain_text_is_split_on_newlines() {
        assert_eq!(
            segments_from_plain_text("ab\n\ncd\r\n"),
            vec![
                Segment::text("ab"),
                Segment::LineBreak,
                Segment::LineBreak,
                Segment::text("cd"),
                Segment::LineBreak,
            ]
        );
    }

    #[test]
    fn char_helpers_handle_multibyte_text() {
        let s = "h\u{00E9}llo \u{1F4A9}!";
        assert_eq!(byte_offset(s, 2), 3);
        assert_eq!(byte_offset(s, 100), s.len());
        assert_eq!(char_offset(s, 3), 2);
        assert_eq!(char_slice(s, 6, 7), "\u{1F4A9}");
    }
}
