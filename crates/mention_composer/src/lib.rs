// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! A mention composer model: free text with atomic mention chips.
//!
//! The [`Document`] holds text, chips and line breaks. It projects to a
//! display string (what the user sees) and a canonical string (what gets
//! stored), and can be rebuilt from the canonical string plus the current
//! option list. [`MentionComposer`] drives a [`Document`] from the events
//! of an [`EditingSurface`].

mod auto_convert;
mod clipboard;
mod composer;
mod composer_update;
mod config;
mod document;
mod error;
mod extract;
mod filter;
mod html;
mod input;
mod insert;
mod mention_option;
mod reconstruct;
mod segment;
mod suggestions;
mod surface;
mod trigger;

pub use crate::auto_convert::{
    convert_range, convert_text, find_matches, AutoMatch, Conversion,
};
pub use crate::clipboard::{Clipboard, StaticClipboard};
pub use crate::composer::MentionComposer;
pub use crate::composer_update::{
    ComposerState, ComposerUpdate, SuggestionUpdate, TextUpdate,
};
pub use crate::config::MentionConfig;
pub use crate::document::{Document, Position};
pub use crate::error::{MentionError, Result};
pub use crate::extract::{
    extract, extract_normalized, MentionData, MentionMetadata,
};
pub use crate::filter::filter_options;
pub use crate::html::to_html;
pub use crate::input::{
    calculate_range, InputEvent, InputType, Key, KeyEvent, KeyHandling,
    Modifiers,
};
pub use crate::insert::{insert_mention, InsertOutcome};
pub use crate::mention_option::{
    value_options, ActionId, MentionOption, OptionValue,
};
pub use crate::reconstruct::{reconstruct, reconstruct_from_display};
pub use crate::segment::{
    rendered_label, segments_from_plain_text, MentionSegment, Segment,
};
pub use crate::suggestions::Suggestions;
pub use crate::surface::{
    char_to_utf16_offset, utf16_to_char_offset, EditingSurface, MemorySurface,
};
pub use crate::trigger::{detect_in_document, detect_trigger, TriggerQuery};
