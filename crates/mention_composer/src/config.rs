// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use crate::mention_option::MentionOption;

/// Host configuration for a [`crate::MentionComposer`].
///
/// Deserialises from camelCase JSON; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MentionConfig {
    /// Starting content as display text. Chips are recognised by their
    /// rendered labels.
    pub initial_value: Option<String>,
    /// Starting content as canonical text. Takes precedence over
    /// `initial_value`.
    pub canonical_value: Option<String>,
    pub options: Vec<MentionOption>,
    pub trigger: char,
    /// Whether a chip's rendered label starts with the trigger.
    pub keep_trigger_on_select: bool,
    /// Promote option names to chips after a typed space or line break.
    pub auto_convert_mentions: bool,
    pub chip_class_name: String,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            initial_value: None,
            canonical_value: None,
            options: Vec::new(),
            trigger: '@',
            keep_trigger_on_select: true,
            auto_convert_mentions: false,
            chip_class_name: "mention-chip".to_owned(),
        }
    }
}

impl MentionConfig {
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn with_canonical_value(mut self, value: impl Into<String>) -> Self {
        self.canonical_value = Some(value.into());
        self
    }

    pub fn with_options(mut self, options: Vec<MentionOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_trigger(mut self, trigger: char) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_keep_trigger_on_select(mut self, keep: bool) -> Self {
        self.keep_trigger_on_select = keep;
        self
    }

    pub fn with_auto_convert_mentions(mut self, enabled: bool) -> Self {
        self.auto_convert_mentions = enabled;
        self
    }

    pub fn with_chip_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.chip_class_name = class_name.into();
        self
    }
}
