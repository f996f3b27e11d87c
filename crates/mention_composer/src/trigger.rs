// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Detect the mention query the caret is currently typing.

use std::ops::Range;

use crate::document::Document;

/// The mention query in progress, if any. Recomputed on every text or
/// selection change and never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerQuery {
    pub active: bool,
    /// Display offset of the trigger character.
    pub trigger_offset: usize,
    /// The text typed after the trigger, lowercased for filtering.
    pub query: String,
    /// Display offset the query ends at (the caret when it was detected).
    pub end: usize,
}

impl TriggerQuery {
    pub fn inactive() -> Self {
        Self::default()
    }

    /// The trigger character plus the typed query.
    pub fn span(&self) -> Range<usize> {
        self.trigger_offset..self.end
    }
}

/// Find the query being typed at `caret` in `text`.
///
/// Scans backwards from the caret for the nearest `trigger` that is not part
/// of a chip (as reported by `is_inside_mention`). Triggers inside chips are
/// skipped rather than ending the search. The query is active only if
/// nothing between the trigger and the caret is whitespace.
pub fn detect_trigger(
    text: &str,
    caret: usize,
    trigger: char,
    is_inside_mention: impl Fn(usize) -> bool,
) -> TriggerQuery {
    let chars: Vec<char> = text.chars().collect();
    if caret == 0 || caret > chars.len() {
        return TriggerQuery::inactive();
    }

    for offset in (0..caret).rev() {
        let c = chars[offset];
        if c == trigger && !is_inside_mention(offset) {
            let query: String = chars[offset + 1..caret].iter().collect();
            return TriggerQuery {
                active: true,
                trigger_offset: offset,
                query: query.to_lowercase(),
                end: caret,
            };
        }
        if c.is_whitespace() {
            // Any trigger further back would have whitespace in its query.
            break;
        }
    }
    TriggerQuery::inactive()
}

/// [`detect_trigger`] over a document's display text, with chip membership
/// taken from the document itself.
pub fn detect_in_document(
    document: &Document,
    caret: usize,
    trigger: char,
) -> TriggerQuery {
    let chips: Vec<Range<usize>> =
        document.mentions().map(|(range, _)| range).collect();
    detect_trigger(&document.display_text(), caret, trigger, |offset| {
        chips.iter().any(|chip| chip.contains(&offset))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;

    fn no_chips(_: usize) -> bool {
        false
    }

    #[test]
    fn caret_at_start_is_inactive() {
        assert!(!detect_trigger("@abc", 0, '@', no_chips).active);
    }

    #[test]
    fn bare_trigger_opens_an_empty_query() {
        let query = detect_trigger("Hi @", 4, '@', no_chips);
        assert!(query.active);
        assert_eq!(query.trigger_offset, 3);
        assert_eq!(query.query, "");
        assert_eq!(query.span(), 3..4);
    }

    #[test]
    fn query_is_lowercased() {
        let query = detect_trigger("Hi @AL", 6, '@', no_chips);
        assert!(query.active);
        assert_eq!(query.query, "al");
        assert_eq!(query.span(), 3..6);
    }

    #[test]
    fn query_only_reaches_the_caret() {
        let query = detect_trigger("@alice", 3, '@', no_chips);
        assert_eq!(query.query, "al");
        assert_eq!(query.end, 3);
    }

    #[test]
    fn whitespace_in_query_deactivates() {
        assert!(!detect_trigger("@al ice", 7, '@', no_chips).active);
        assert!(!detect_trigger("@al\tx", 5, '@', no_chips).active);
        assert!(!detect_trigger("@al\nx", 5, '@', no_chips).active);
    }

    #[test]
    fn no_trigger_is_inactive() {
        assert!(!detect_trigger("hello", 5, '@', no_chips).active);
    }

    #[test]
    fn caret_past_the_end_is_inactive() {
        assert!(!detect_trigger("@a", 9, '@', no_chips).active);
    }

    #[test]
    fn custom_trigger() {
        let query = detect_trigger("see #gen", 8, '#', no_chips);
        assert!(query.active);
        assert_eq!(query.trigger_offset, 4);
        assert_eq!(query.query, "gen");
    }

    #[test]
    fn trigger_inside_chip_is_skipped_not_fatal() {
        // "@x@Bob" where "@Bob" (2..6) is a chip: the scan passes over the
        // chip's trigger and finds the typed one at 0.
        let query = detect_trigger("@x@Bob", 6, '@', |offset| (2..6).contains(&offset));
        assert!(query.active);
        assert_eq!(query.trigger_offset, 0);
    }

    #[test]
    fn caret_just_after_a_chip_is_inactive() {
        let query = detect_trigger("hi @Bob", 7, '@', |offset| (3..7).contains(&offset));
        assert!(!query.active);
    }

    #[test]
    fn trigger_inside_a_label_text_still_counts_outside_chips() {
        // A plain "a@b" typed by the user is a candidate position.
        let query = detect_trigger("a@b", 3, '@', no_chips);
        assert!(query.active);
        assert_eq!(query.trigger_offset, 1);
    }

    #[test]
    fn prefix_without_trigger_or_whitespace_then_query() {
        for (prefix, query) in [("abc", "x"), ("hello", "World_1"), ("", "q")] {
            let text = format!("{prefix}@{query}");
            let caret = text.chars().count();
            let detected = detect_trigger(&text, caret, '@', no_chips);
            assert!(detected.active, "{text}");
            assert_eq!(detected.query, query.to_lowercase());
        }
    }

    #[test]
    fn detects_against_document_chips() {
        let document = Document::from_segments(vec![
            Segment::text("hi "),
            Segment::mention("Bob", "b", '@', true),
            Segment::text(" @j"),
        ]);
        let query = detect_in_document(&document, 10, '@');
        assert!(query.active);
        assert_eq!(query.trigger_offset, 8);
        assert_eq!(query.query, "j");

        assert!(!detect_in_document(&document, 7, '@').active);
    }
}
