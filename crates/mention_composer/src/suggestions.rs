// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! State of the candidate list shown while a query is being typed.

use crate::filter::filter_options;
use crate::mention_option::MentionOption;
use crate::trigger::TriggerQuery;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Suggestions {
    open: bool,
    query: TriggerQuery,
    filtered: Vec<MentionOption>,
    highlighted: usize,
}

impl Suggestions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The query the list was opened for. Inactive when closed.
    pub fn query(&self) -> &TriggerQuery {
        &self.query
    }

    pub fn filtered(&self) -> &[MentionOption] {
        &self.filtered
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted_option(&self) -> Option<&MentionOption> {
        self.filtered.get(self.highlighted)
    }

    /// Open (or update) the list for `query`. The highlight goes back to the
    /// first entry whenever the filtered set changes.
    pub fn open(&mut self, query: TriggerQuery, options: &[MentionOption]) {
        let filtered = filter_options(options, &query.query);
        if !self.open || filtered != self.filtered {
            self.highlighted = 0;
        }
        self.filtered = filtered;
        self.query = query;
        self.open = true;
    }

    /// Re-run the filter after the option list was replaced.
    pub fn refilter(&mut self, options: &[MentionOption]) {
        if self.open {
            let query = self.query.clone();
            self.open(query, options);
        }
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Highlight the next entry, wrapping to the first.
    pub fn move_down(&mut self) {
        if !self.filtered.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.filtered.len();
        }
    }

    /// Highlight the previous entry, wrapping to the last.
    pub fn move_up(&mut self) {
        if !self.filtered.is_empty() {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(self.filtered.len() - 1);
        }
    }
}
