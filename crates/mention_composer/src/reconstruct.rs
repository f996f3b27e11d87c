// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Rebuild a [`Document`] from persisted text and the live option list.
//!
//! The canonical text only stores values, so a chip is recognised wherever
//! an option's value occurs, and gets the option's *current* label. Renamed
//! options therefore show their new name when a stored message is loaded.

use std::cmp::Reverse;

use crate::document::Document;
use crate::mention_option::{value_options, MentionOption};
use crate::segment::{rendered_label, MentionSegment, Segment};

/// Characters that glue a value into a larger identifier.
const WORD_SEPARATORS: [char; 3] = ['_', '-', '.'];

/// Which projection of each option is searched for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchKey {
    Value,
    RenderedLabel,
}

#[derive(Debug)]
struct Occurrence<'a> {
    start: usize,
    end: usize,
    len: usize,
    order: usize,
    option: &'a MentionOption,
}

/// Rebuild a document from canonical (value) text.
///
/// An occurrence of a value directly preceded or followed by `_`, `-` or
/// `.` is ignored: it is part of some longer identifier. Values may sit
/// flush against each other or against letters. Overlaps keep the earliest
/// match; of several matches starting at the same place the longest wins,
/// then the one declared first. Line breaks become structural breaks.
pub fn reconstruct(
    canonical: &str,
    options: &[MentionOption],
    trigger: char,
    keep_trigger: bool,
) -> Document {
    reconstruct_with(canonical, options, trigger, keep_trigger, MatchKey::Value)
}

/// Rebuild a document from display text by recognising rendered labels
/// (`@Alice`, or `Alice` when the trigger is not kept).
///
/// A label only matches as a whole word.
pub fn reconstruct_from_display(
    display: &str,
    options: &[MentionOption],
    trigger: char,
    keep_trigger: bool,
) -> Document {
    reconstruct_with(display, options, trigger, keep_trigger, MatchKey::RenderedLabel)
}

fn reconstruct_with(
    text: &str,
    options: &[MentionOption],
    trigger: char,
    keep_trigger: bool,
    key: MatchKey,
) -> Document {
    if text.is_empty() {
        return Document::new();
    }

    let mut occurrences = Vec::new();
    for (order, option) in value_options(options).enumerate() {
        let needle = match key {
            MatchKey::Value => option.value_str().unwrap_or_default().to_owned(),
            MatchKey::RenderedLabel => rendered_label(&option.label, trigger, keep_trigger),
        };
        if needle.is_empty() {
            continue;
        }
        for start in find_all(text, &needle) {
            let end = start + needle.len();
            if !accepts(text, start, end, key) {
                continue;
            }
            occurrences.push(Occurrence {
                start,
                end,
                len: needle.chars().count(),
                order,
                option,
            });
        }
    }
    occurrences.sort_by_key(|o| (o.start, Reverse(o.len), o.order));

    let mut segments = Vec::new();
    let mut cursor = 0;
    for occurrence in occurrences {
        if occurrence.start < cursor {
            continue;
        }
        let Some(chip) = MentionSegment::from_option(occurrence.option, trigger, keep_trigger)
        else {
            continue;
        };
        if occurrence.start > cursor {
            segments.push(Segment::text(&text[cursor..occurrence.start]));
        }
        segments.push(Segment::Mention(chip));
        cursor = occurrence.end;
    }
    if cursor < text.len() {
        segments.push(Segment::text(&text[cursor..]));
    }
    Document::from_segments(segments)
}

/// Byte offsets of every occurrence of `needle`, overlapping ones included.
fn find_all(haystack: &str, needle: &str) -> Vec<usize> {
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(index) = haystack[from..].find(needle) {
        let start = from + index;
        found.push(start);
        let step = haystack[start..].chars().next().map_or(1, char::len_utf8);
        from = start + step;
        if from > haystack.len() {
            break;
        }
    }
    found
}

fn accepts(text: &str, start: usize, end: usize, key: MatchKey) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    match key {
        MatchKey::Value => {
            !before.is_some_and(|c| WORD_SEPARATORS.contains(&c))
                && !after.is_some_and(|c| WORD_SEPARATORS.contains(&c))
        }
        MatchKey::RenderedLabel => {
            let matched = &text[start..end];
            let first = matched.chars().next();
            let last = matched.chars().next_back();
            !(is_word(before) && is_word(first)) && !(is_word(after) && is_word(last))
        }
    }
}

fn is_word(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric() || c == '_')
}
