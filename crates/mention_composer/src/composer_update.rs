// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::extract::MentionData;
use crate::mention_option::MentionOption;
use crate::suggestions::Suggestions;

/// What the host has to do with the surface after an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TextUpdate {
    #[default]
    Keep,
    /// The document changed: show `display_text` with the caret at `caret`.
    /// The surface has already been updated.
    ReplaceAll { display_text: String, caret: usize },
    /// Only the caret moved, e.g. out of a chip.
    Select { caret: usize },
}

/// What the host has to do with the suggestion list after an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SuggestionUpdate {
    #[default]
    Keep,
    Open {
        query: String,
        options: Vec<MentionOption>,
        highlighted: usize,
    },
    Close,
}

impl SuggestionUpdate {
    pub(crate) fn open(suggestions: &Suggestions) -> Self {
        Self::Open {
            query: suggestions.query().query.clone(),
            options: suggestions.filtered().to_vec(),
            highlighted: suggestions.highlighted(),
        }
    }
}

/// Everything one handled event changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposerUpdate {
    pub text_update: TextUpdate,
    pub suggestion_update: SuggestionUpdate,
    /// The new projection, present when it differs from the last one
    /// reported. The change callback received exactly this value.
    pub change: Option<MentionData>,
}

impl ComposerUpdate {
    pub fn keep() -> Self {
        Self::default()
    }

    pub fn replace_all(display_text: String, caret: usize) -> Self {
        Self {
            text_update: TextUpdate::ReplaceAll { display_text, caret },
            ..Self::default()
        }
    }

    pub fn select(caret: usize) -> Self {
        Self {
            text_update: TextUpdate::Select { caret },
            ..Self::default()
        }
    }

    pub fn with_suggestions(mut self, suggestion_update: SuggestionUpdate) -> Self {
        self.suggestion_update = suggestion_update;
        self
    }

    pub fn is_keep(&self) -> bool {
        *self == Self::keep()
    }
}

/// Presentation state the host mirrors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposerState {
    pub focused: bool,
    /// True while the document is empty.
    pub show_placeholder: bool,
}
