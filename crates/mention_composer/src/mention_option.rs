// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

/// Identifies the host-side handler an action option runs when selected.
pub type ActionId = String;

/// What selecting a [`MentionOption`] does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionValue {
    /// Insert a chip carrying this canonical value.
    Value(String),
    /// Discard the query and ask the host to run the named action.
    Action(ActionId),
}

/// A candidate offered in the suggestion list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionOption {
    pub label: String,
    pub value: OptionValue,
}

impl MentionOption {
    /// An option that inserts a chip for `value`.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: OptionValue::Value(value.into()),
        }
    }

    /// An option that runs the action `id` instead of inserting a chip.
    pub fn action(label: impl Into<String>, id: impl Into<ActionId>) -> Self {
        Self {
            label: label.into(),
            value: OptionValue::Action(id.into()),
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self.value, OptionValue::Action(_))
    }

    /// The canonical value, unless this is an action option.
    pub fn value_str(&self) -> Option<&str> {
        match &self.value {
            OptionValue::Value(value) => Some(value),
            OptionValue::Action(_) => None,
        }
    }

    pub fn action_id(&self) -> Option<&str> {
        match &self.value {
            OptionValue::Action(id) => Some(id),
            OptionValue::Value(_) => None,
        }
    }
}

/// The options that can become chips, in declaration order.
pub fn value_options(
    options: &[MentionOption],
) -> impl Iterator<Item = &MentionOption> {
    options.iter().filter(|option| !option.is_action())
}
