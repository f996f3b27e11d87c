// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

/// Failures produced by the document algorithms.
///
/// None of these ever reach the end user: [`crate::MentionComposer`] absorbs
/// them at its boundary, logs them and turns the event into a no-op.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MentionError {
    /// A caret or trigger offset no longer fits the current document.
    #[error("offset {offset} is outside a document of length {len}")]
    StaleOffset { offset: usize, len: usize },

    /// A range that is inverted or reaches past the end of the document.
    #[error("range {start}..{end} is invalid for a document of length {len}")]
    StaleRange { start: usize, end: usize, len: usize },

    /// The trigger recorded for a query is not where it used to be.
    #[error("expected trigger {trigger:?} at offset {offset}")]
    TriggerMoved { trigger: char, offset: usize },

    /// Reading from the clipboard failed or was denied.
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// Whitespace cannot start a mention query.
    #[error("{0:?} cannot be used as a mention trigger")]
    InvalidTrigger(char),
}

pub type Result<T, E = MentionError> = std::result::Result<T, E>;
