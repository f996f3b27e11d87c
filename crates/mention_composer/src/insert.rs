// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Commit a selected option into the document at the query span.

use std::ops::Range;

use crate::document::Document;
use crate::error::{MentionError, Result};
use crate::mention_option::{ActionId, MentionOption, OptionValue};
use crate::segment::{MentionSegment, Segment};
use crate::trigger::TriggerQuery;

/// What selecting an option did to the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A chip now covers `chip` and the caret sits at `caret`, after the
    /// separator space if one was added.
    Inserted { chip: Range<usize>, caret: usize },
    /// The query was removed; the host should now run the action `id`.
    Action { id: ActionId, caret: usize },
}

impl InsertOutcome {
    pub fn caret(&self) -> usize {
        match self {
            Self::Inserted { caret, .. } | Self::Action { caret, .. } => *caret,
        }
    }
}

/// A chip is followed by a space unless whitespace already follows it.
pub(crate) fn separator_needed(next: Option<char>) -> bool {
    !next.is_some_and(char::is_whitespace)
}

/// Replace the trigger and query described by `query` with a chip for
/// `option`, or just remove them if `option` is an action.
///
/// Fails without touching the document if the query no longer matches it:
/// the span reaches past the end, or the trigger is gone or now belongs to
/// a chip.
pub fn insert_mention(
    document: &mut Document,
    query: &TriggerQuery,
    option: &MentionOption,
    trigger: char,
    keep_trigger: bool,
) -> Result<InsertOutcome> {
    let span = verify_query_span(document, query, trigger)?;

    let value = match &option.value {
        OptionValue::Value(value) => value,
        OptionValue::Action(id) => {
            let caret = document.delete_range(span)?;
            return Ok(InsertOutcome::Action {
                id: id.clone(),
                caret,
            });
        }
    };

    let chip = MentionSegment::new(&option.label, value, trigger, keep_trigger);
    let chip_len = chip.display_len();
    let next = document.display_text().chars().nth(span.end);

    let mut replacement = vec![Segment::Mention(chip)];
    if separator_needed(next) {
        replacement.push(Segment::text(" "));
    }
    let inserted = document.splice(span, replacement)?;
    Ok(InsertOutcome::Inserted {
        chip: inserted.start..inserted.start + chip_len,
        caret: inserted.end,
    })
}

fn verify_query_span(
    document: &Document,
    query: &TriggerQuery,
    trigger: char,
) -> Result<Range<usize>> {
    let span = query.span();
    let len = document.len();
    if !query.active || span.is_empty() || span.end > len {
        return Err(MentionError::StaleRange {
            start: span.start,
            end: span.end,
            len,
        });
    }
    let found = document.display_text().chars().nth(span.start);
    if found != Some(trigger) || document.is_inside_mention(span.start) {
        return Err(MentionError::TriggerMoved {
            trigger,
            offset: span.start,
        });
    }
    Ok(span)
}
