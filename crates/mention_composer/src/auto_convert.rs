// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Promote option names found in freshly typed or pasted text to chips.
//!
//! Two kinds of match are recognised:
//!
//! - *triggered*: the trigger followed by `[A-Za-z0-9_]+`, where the
//!   identifier equals (ignoring case) an option's label or value;
//! - *bare word*: an option's label or value as a whole word, ignoring case.
//!   Only looked for when chips do not keep their trigger.
//!
//! A bare-word match that overlaps a triggered one is dropped.

use std::ops::Range;

use regex::Regex;

use crate::document::Document;
use crate::error::Result;
use crate::insert::separator_needed;
use crate::mention_option::{value_options, MentionOption};
use crate::segment::{char_offset, char_slice, MentionSegment, Segment};

/// A span of the scanned text that resolves to an option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoMatch {
    /// `char` range within the scanned text.
    pub range: Range<usize>,
    pub option: MentionOption,
    pub triggered: bool,
}

/// The result of converting a piece of plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    /// Replacement content for the scanned text.
    pub segments: Vec<Segment>,
    /// For each converted match: its old range and the display length of
    /// the chip plus any separator that replaced it.
    edits: Vec<(Range<usize>, usize)>,
}

impl Conversion {
    pub fn matched(&self) -> usize {
        self.edits.len()
    }

    /// Translate an offset in the scanned text into one in the converted
    /// content. Offsets inside a converted match move past its chip.
    pub fn map_offset(&self, offset: usize) -> usize {
        let mut shift: isize = 0;
        for (range, new_len) in &self.edits {
            if offset <= range.start {
                break;
            }
            let mapped_start = (range.start as isize + shift) as usize;
            if offset < range.end {
                return mapped_start + new_len;
            }
            shift += *new_len as isize - range.len() as isize;
        }
        (offset as isize + shift) as usize
    }
}

/// Find every convertible match in `text`, ordered by position.
pub fn find_matches(
    text: &str,
    options: &[MentionOption],
    trigger: char,
    keep_trigger: bool,
) -> Vec<AutoMatch> {
    let candidates: Vec<&MentionOption> = value_options(options).collect();
    if candidates.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let mut matches = triggered_matches(text, &candidates, trigger);
    if !keep_trigger {
        let bare: Vec<AutoMatch> = bare_word_matches(text, &candidates)
            .into_iter()
            .filter(|candidate| {
                !matches.iter().any(|triggered| overlaps(&triggered.range, &candidate.range))
            })
            .collect();
        matches.extend(bare);
    }
    matches.sort_by_key(|m| m.range.start);
    matches
}

/// Convert `text` into segments, turning every match into a chip.
///
/// `following` is the character that comes right after `text` in the
/// document, used to decide whether a chip at the very end needs a
/// separator space. Two matches that touch in the source stay touching.
pub fn convert_text(
    text: &str,
    following: Option<char>,
    options: &[MentionOption],
    trigger: char,
    keep_trigger: bool,
) -> Conversion {
    let matches = find_matches(text, options, trigger, keep_trigger);
    let chars: Vec<char> = text.chars().collect();

    let mut segments = Vec::new();
    let mut edits = Vec::new();
    let mut cursor = 0;
    for (i, found) in matches.iter().enumerate() {
        let Some(chip) = MentionSegment::from_option(&found.option, trigger, keep_trigger) else {
            continue;
        };
        if found.range.start > cursor {
            segments.push(Segment::text(char_slice(text, cursor, found.range.start)));
        }
        let mut new_len = chip.display_len();
        segments.push(Segment::Mention(chip));

        let next = chars.get(found.range.end).copied().or(following);
        let touches_next = matches
            .get(i + 1)
            .is_some_and(|after| after.range.start == found.range.end);
        if !touches_next && separator_needed(next) {
            segments.push(Segment::text(" "));
            new_len += 1;
        }
        edits.push((found.range.clone(), new_len));
        cursor = found.range.end;
    }
    if cursor < chars.len() {
        segments.push(Segment::text(char_slice(text, cursor, chars.len())));
    }

    Conversion { segments, edits }
}

/// Convert the plain text the document holds in `range` in place.
///
/// `range` should be a text run (see [`Document::text_run_around`]).
/// Returns `None` when nothing in it matched.
pub fn convert_range(
    document: &mut Document,
    range: Range<usize>,
    options: &[MentionOption],
    trigger: char,
    keep_trigger: bool,
) -> Result<Option<Conversion>> {
    let display = document.display_text();
    let text = char_slice(&display, range.start, range.end).to_owned();
    let following = display.chars().nth(range.end);

    let conversion = convert_text(&text, following, options, trigger, keep_trigger);
    if conversion.matched() == 0 {
        return Ok(None);
    }
    log::debug!(
        "auto-converting {} match(es) in {}..{}",
        conversion.matched(),
        range.start,
        range.end
    );
    document.splice(range, conversion.segments.clone())?;
    Ok(Some(conversion))
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn resolve<'a>(candidates: &[&'a MentionOption], name: &str) -> Option<&'a MentionOption> {
    candidates.iter().copied().find(|option| {
        eq_ignore_case(&option.label, name)
            || option.value_str().is_some_and(|value| eq_ignore_case(value, name))
    })
}

fn triggered_matches(
    text: &str,
    candidates: &[&MentionOption],
    trigger: char,
) -> Vec<AutoMatch> {
    let pattern = format!("{}([A-Za-z0-9_]+)", regex::escape(&trigger.to_string()));
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            log::warn!("could not build trigger pattern {pattern:?}: {e}");
            return Vec::new();
        }
    };

    regex
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let name = captures.get(1)?.as_str();
            let option = resolve(candidates, name)?;
            Some(AutoMatch {
                range: char_offset(text, whole.start())..char_offset(text, whole.end()),
                option: option.clone(),
                triggered: true,
            })
        })
        .collect()
}

fn bare_word_matches(text: &str, candidates: &[&MentionOption]) -> Vec<AutoMatch> {
    let mut names: Vec<&str> = candidates
        .iter()
        .flat_map(|option| [Some(option.label.as_str()), option.value_str()])
        .flatten()
        .filter(|name| !name.is_empty())
        .collect();
    // Longest first, so a longer name wins over a prefix of it.
    names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    names.dedup();
    if names.is_empty() {
        return Vec::new();
    }

    let alternation: Vec<String> = names.iter().map(|name| regex::escape(name)).collect();
    let pattern = format!(r"(?i)\b(?:{})\b", alternation.join("|"));
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            log::warn!("could not build bare-word pattern over {} names: {e}", names.len());
            return Vec::new();
        }
    };

    regex
        .find_iter(text)
        .filter_map(|found| {
            let option = resolve(candidates, found.as_str())?;
            Some(AutoMatch {
                range: char_offset(text, found.start())..char_offset(text, found.end()),
                option: option.clone(),
                triggered: false,
            })
        })
        .collect()
}
