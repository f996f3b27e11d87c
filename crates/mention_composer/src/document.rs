// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The mention document: an ordered run of [`Segment`]s.
//!
//! Positions are `char` offsets into the display projection. A chip covers
//! `[start, start + rendered label length)` and is atomic: a caret may stand
//! on either boundary but never inside it, and any edit that touches part of
//! a chip removes all of it.
//!
//! Every mutation leaves the document normalised: no empty text segments,
//! no two adjacent text segments and no `\n` inside a text segment.

use std::ops::Range;

use crate::error::{MentionError, Result};
use crate::segment::{
    byte_offset, segments_from_plain_text, MentionSegment, Segment,
};

/// Where a display offset lands inside a [`Document`].
///
/// `segment == segments().len()` means the end of the document. For a text
/// segment `inner` may be anywhere in `0..=len`; for a chip or a line break
/// it is always `0` (the caret sits just before it).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub segment: usize,
    pub inner: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    segments: Vec<Segment>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let mut document = Self { segments };
        document.normalize();
        document
    }

    pub fn from_plain_text(text: &str) -> Self {
        Self::from_segments(segments_from_plain_text(text))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Length of the display projection in chars.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::display_len).sum()
    }

    pub fn display_text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            segment.push_display(&mut text);
        }
        text
    }

    pub fn canonical_text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            segment.push_canonical(&mut text);
        }
        text
    }

    /// Each segment together with the display range it covers.
    pub fn spans(&self) -> impl Iterator<Item = (Range<usize>, &Segment)> {
        let mut cursor = 0;
        self.segments.iter().map(move |segment| {
            let start = cursor;
            cursor += segment.display_len();
            (start..cursor, segment)
        })
    }

    pub fn mentions(&self) -> impl Iterator<Item = (Range<usize>, &MentionSegment)> {
        self.spans().filter_map(|(range, segment)| {
            segment.as_mention().map(|mention| (range, mention))
        })
    }

    /// Resolve a display offset to a segment and an offset within it.
    ///
    /// An offset on the boundary between a text segment and whatever follows
    /// resolves to the end of the text, so typed text extends it.
    pub fn locate(&self, offset: usize) -> Result<Position> {
        for (index, (range, segment)) in self.spans().enumerate() {
            if offset < range.end
                || (offset == range.end && segment.is_text())
            {
                return Ok(Position {
                    segment: index,
                    inner: offset - range.start,
                });
            }
        }
        let len = self.len();
        if offset == len {
            Ok(Position {
                segment: self.segments.len(),
                inner: 0,
            })
        } else {
            Err(MentionError::StaleOffset { offset, len })
        }
    }

    /// The chip whose rendered label contains the char at `offset`.
    pub fn mention_at(
        &self,
        offset: usize,
    ) -> Option<(Range<usize>, &MentionSegment)> {
        self.mentions().find(|(range, _)| range.contains(&offset))
    }

    /// Whether the char at `offset` belongs to a chip's rendered label.
    pub fn is_inside_mention(&self, offset: usize) -> bool {
        self.mention_at(offset).is_some()
    }

    /// Move an offset that falls strictly inside a chip to the chip's end,
    /// and clamp anything past the end of the document.
    pub fn snap_caret(&self, offset: usize) -> usize {
        match self.mention_at(offset) {
            Some((range, _)) if range.start < offset => range.end,
            _ => offset.min(self.len()),
        }
    }

    /// Grow `range` so it never cuts a chip in half. A collapsed range is
    /// snapped like a caret instead.
    pub fn expand_range(&self, range: Range<usize>) -> Result<Range<usize>> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(MentionError::StaleRange {
                start: range.start,
                end: range.end,
                len,
            });
        }
        if range.is_empty() {
            let caret = self.snap_caret(range.start);
            return Ok(caret..caret);
        }
        let start = match self.mention_at(range.start) {
            Some((chip, _)) => chip.start,
            None => range.start,
        };
        let end = match range.end.checked_sub(1).and_then(|last| self.mention_at(last)) {
            Some((chip, _)) => chip.end,
            None => range.end,
        };
        Ok(start..end)
    }

    /// Replace the display range `range` with `replacement`.
    ///
    /// The range is first expanded over any chip it touches. Returns the
    /// display range the replacement occupies afterwards.
    pub fn splice(
        &mut self,
        range: Range<usize>,
        replacement: Vec<Segment>,
    ) -> Result<Range<usize>> {
        let range = self.expand_range(range)?;
        let inserted: usize = replacement.iter().map(Segment::display_len).sum();

        let mut before = Vec::new();
        let mut after = Vec::new();
        for (span, segment) in self.spans() {
            if span.end <= range.start {
                before.push(segment.clone());
            } else if span.start >= range.end {
                after.push(segment.clone());
            } else if let Segment::Text(text) = segment {
                let keep_head = range.start.saturating_sub(span.start);
                let skip_to = range.end.min(span.end) - span.start;
                let head = &text[..byte_offset(text, keep_head)];
                let tail = &text[byte_offset(text, skip_to)..];
                if !head.is_empty() {
                    before.push(Segment::text(head));
                }
                if !tail.is_empty() {
                    after.push(Segment::text(tail));
                }
            }
            // Chips and breaks overlapping the range are dropped whole.
        }

        before.extend(replacement);
        before.extend(after);
        self.segments = before;
        self.normalize();
        Ok(range.start..range.start + inserted)
    }

    /// Insert plain text at `offset`, returning the caret after it.
    pub fn insert_text(&mut self, offset: usize, text: &str) -> Result<usize> {
        let inserted = self.splice(offset..offset, segments_from_plain_text(text))?;
        Ok(inserted.end)
    }

    /// Delete `range` (widened over any chip it touches), returning the
    /// caret where the deleted content used to start.
    pub fn delete_range(&mut self, range: Range<usize>) -> Result<usize> {
        Ok(self.splice(range, Vec::new())?.start)
    }

    /// The display range of the text segment the caret at `offset` is in,
    /// or an empty range at `offset` when it sits between non-text
    /// segments.
    pub fn text_run_around(&self, offset: usize) -> Range<usize> {
        let Ok(position) = self.locate(offset) else {
            return offset..offset;
        };
        match self.segments.get(position.segment) {
            Some(Segment::Text(text)) => {
                let start = offset - position.inner;
                start..start + text.chars().count()
            }
            _ => offset..offset,
        }
    }

    /// Drop structural leftovers: a document holding nothing but a single
    /// line break is really empty. Returns whether anything was removed.
    pub fn collapse_if_blank(&mut self) -> bool {
        if matches!(self.segments.as_slice(), [Segment::LineBreak]) {
            self.segments.clear();
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    fn normalize(&mut self) {
        let mut normalized: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in self.segments.drain(..) {
            match segment {
                Segment::Text(text) if text.contains('\n') => {
                    for piece in segments_from_plain_text(&text) {
                        push_merging(&mut normalized, piece);
                    }
                }
                other => push_merging(&mut normalized, other),
            }
        }
        self.segments = normalized;
        self.assert_invariants();
    }

    /// Panics if the normalisation invariants do not hold. Only active with
    /// the `assert-invariants` feature.
    pub fn assert_invariants(&self) {
        cfg_if::cfg_if! {
            if #[cfg(feature = "assert-invariants")] {
                for pair in self.segments.windows(2) {
                    assert!(
                        !(pair[0].is_text() && pair[1].is_text()),
                        "adjacent text segments in {:?}",
                        self.segments
                    );
                }
                for segment in &self.segments {
                    if let Segment::Text(text) = segment {
                        assert!(!text.is_empty(), "empty text segment");
                        assert!(!text.contains('\n'), "newline inside text segment");
                    }
                }
            }
        }
    }
}

fn push_merging(segments: &mut Vec<Segment>, segment: Segment) {
    match segment {
        Segment::Text(text) if text.is_empty() => {}
        Segment::Text(text) => match segments.last_mut() {
            Some(Segment::Text(previous)) => previous.push_str(&text),
            _ => segments.push(Segment::Text(text)),
        },
        other => segments.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip(label: &str, value: &str) -> Segment {
        Segment::mention(label, value, '@', true)
    }

    /// "Hi @Alice and more": the chip covers 3..9.
    fn hi_alice() -> Document {
        Document::from_segments(vec![
            Segment::text("Hi "),
            chip("Alice", "a1"),
            Segment::text(" and more"),
        ])
    }

    #[test]
    fn adjacent_text_segments_are_merged() {
        let document = Document::from_segments(vec![
            Segment::text("a"),
            Segment::text(""),
            Segment::text("b"),
        ]);
        assert_eq!(document.segments(), &[Segment::text("ab")]);
    }

    #[test]
    fn newlines_in_text_become_line_breaks() {
        let document = Document::from_segments(vec![Segment::text("a\nb")]);
        assert_eq!(
            document.segments(),
            &[Segment::text("a"), Segment::LineBreak, Segment::text("b")]
        );
        assert_eq!(document.display_text(), "a\nb");
    }

    #[test]
    fn projections_use_labels_and_values() {
        let document = hi_alice();
        assert_eq!(document.display_text(), "Hi @Alice and more");
        assert_eq!(document.canonical_text(), "Hi a1 and more");
        assert_eq!(document.len(), 18);
    }

    #[test]
    fn locate_prefers_the_end_of_text_before_a_chip() {
        let document = hi_alice();
        assert_eq!(document.locate(3), Ok(Position { segment: 0, inner: 3 }));
        assert_eq!(document.locate(5), Ok(Position { segment: 1, inner: 2 }));
        assert_eq!(document.locate(9), Ok(Position { segment: 2, inner: 0 }));
        assert_eq!(document.locate(18), Ok(Position { segment: 2, inner: 9 }));
    }

    #[test]
    fn locate_after_a_trailing_chip_is_the_end() {
        let document = Document::from_segments(vec![chip("Bob", "b")]);
        assert_eq!(document.locate(0), Ok(Position { segment: 0, inner: 0 }));
        assert_eq!(document.locate(4), Ok(Position { segment: 1, inner: 0 }));
    }

    #[test]
    fn locate_past_the_end_is_stale() {
        let document = hi_alice();
        assert_eq!(
            document.locate(19),
            Err(MentionError::StaleOffset { offset: 19, len: 18 })
        );
    }

    #[test]
    fn chip_boundaries_are_not_inside() {
        let document = hi_alice();
        assert!(!document.is_inside_mention(2));
        assert!(document.is_inside_mention(3));
        assert!(document.is_inside_mention(8));
        assert!(!document.is_inside_mention(9));
    }

    #[test]
    fn carets_inside_chips_snap_to_the_end() {
        let document = hi_alice();
        assert_eq!(document.snap_caret(3), 3);
        assert_eq!(document.snap_caret(5), 9);
        assert_eq!(document.snap_caret(100), 18);
    }

    #[test]
    fn ranges_that_cut_a_chip_cover_all_of_it() {
        let document = hi_alice();
        assert_eq!(document.expand_range(1..5), Ok(1..9));
        assert_eq!(document.expand_range(6..11), Ok(3..11));
        assert_eq!(document.expand_range(9..11), Ok(9..11));
        assert_eq!(
            document.expand_range(5..2),
            Err(MentionError::StaleRange { start: 5, end: 2, len: 18 })
        );
    }

    #[test]
    fn inserting_text_extends_the_text_before_a_chip() {
        let mut document = hi_alice();
        let caret = document.insert_text(3, "dear ").unwrap();
        assert_eq!(caret, 8);
        assert_eq!(document.display_text(), "Hi dear @Alice and more");
        assert_eq!(document.segments().len(), 3);
    }

    #[test]
    fn inserting_inside_a_chip_lands_after_it() {
        let mut document = hi_alice();
        let caret = document.insert_text(6, "!").unwrap();
        assert_eq!(document.display_text(), "Hi @Alice! and more");
        assert_eq!(caret, 10);
    }

    #[test]
    fn deleting_one_char_of_a_chip_removes_the_chip() {
        let mut document = hi_alice();
        let caret = document.delete_range(8..9).unwrap();
        assert_eq!(caret, 3);
        assert_eq!(document.display_text(), "Hi  and more");
        assert_eq!(document.segments(), &[Segment::text("Hi  and more")]);
    }

    #[test]
    fn deleting_across_a_line_break_joins_lines() {
        let mut document = Document::from_plain_text("ab\ncd");
        document.delete_range(2..3).unwrap();
        assert_eq!(document.segments(), &[Segment::text("abcd")]);
    }

    #[test]
    fn splice_reports_the_inserted_range() {
        let mut document = Document::from_plain_text("Hi @al");
        let inserted = document
            .splice(3..6, vec![chip("Alice", "a1"), Segment::text(" ")])
            .unwrap();
        assert_eq!(inserted, 3..10);
        assert_eq!(document.display_text(), "Hi @Alice ");
    }

    #[test]
    fn splice_between_two_chips() {
        let mut document =
            Document::from_segments(vec![chip("A", "a"), chip("B", "b")]);
        document.insert_text(2, "x").unwrap();
        assert_eq!(document.display_text(), "@Ax@B");
    }

    #[test]
    fn text_run_is_the_text_segment_around_the_caret() {
        let document = hi_alice();
        assert_eq!(document.text_run_around(12), 9..18);
        assert_eq!(document.text_run_around(3), 0..3);
        let chips = Document::from_segments(vec![chip("A", "a"), chip("B", "b")]);
        assert_eq!(chips.text_run_around(2), 2..2);
    }

    #[test]
    fn a_lone_line_break_collapses() {
        let mut document = Document::from_plain_text("\n");
        assert!(document.collapse_if_blank());
        assert!(document.is_empty());

        let mut two = Document::from_plain_text("\n\n");
        assert!(!two.collapse_if_blank());
        assert_eq!(two.len(), 2);
    }
}
