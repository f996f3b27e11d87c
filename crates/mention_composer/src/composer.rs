// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! [`MentionComposer`]: the single controller between an editing surface
//! and the mention document.
//!
//! Every handler runs one event to completion: it reads the caret from the
//! surface, mutates the document, pushes the new display text back, updates
//! the suggestion list and finally reports the new projection. Errors never
//! escape a handler; a stale event is logged and becomes a no-op.

use std::ops::Range;

use crate::auto_convert::{convert_range, convert_text};
use crate::clipboard::Clipboard;
use crate::composer_update::{ComposerState, ComposerUpdate, SuggestionUpdate};
use crate::config::MentionConfig;
use crate::document::Document;
use crate::error::{MentionError, Result};
use crate::extract::{extract, MentionData};
use crate::html::to_html;
use crate::input::{calculate_range, InputEvent, InputType, Key, KeyEvent, KeyHandling};
use crate::insert::{insert_mention, InsertOutcome};
use crate::mention_option::{ActionId, MentionOption};
use crate::reconstruct::{reconstruct, reconstruct_from_display};
use crate::segment::{segments_from_plain_text, Segment};
use crate::suggestions::Suggestions;
use crate::surface::EditingSurface;
use crate::trigger::detect_in_document;

type ChangeHandler = Box<dyn FnMut(&MentionData)>;
type KeyHandler = Box<dyn FnMut(&KeyEvent)>;
type ActionHandler = Box<dyn FnMut(&ActionId)>;

pub struct MentionComposer<S: EditingSurface> {
    surface: S,
    document: Document,
    config: MentionConfig,
    suggestions: Suggestions,
    focused: bool,
    last_reported: MentionData,
    change_handler: Option<ChangeHandler>,
    key_handler: Option<KeyHandler>,
    action_handler: Option<ActionHandler>,
}

impl<S: EditingSurface> MentionComposer<S> {
    /// Build the initial document from the configured value and show it on
    /// `surface` with the caret at the end.
    pub fn new(surface: S, config: MentionConfig) -> Result<Self> {
        if config.trigger.is_whitespace() {
            return Err(MentionError::InvalidTrigger(config.trigger));
        }
        let document = match (&config.canonical_value, &config.initial_value) {
            (Some(canonical), _) if !canonical.is_empty() => reconstruct(
                canonical,
                &config.options,
                config.trigger,
                config.keep_trigger_on_select,
            ),
            (_, Some(display)) if !display.is_empty() => reconstruct_from_display(
                display,
                &config.options,
                config.trigger,
                config.keep_trigger_on_select,
            ),
            _ => Document::new(),
        };
        let last_reported = extract(&document);

        let mut composer = Self {
            surface,
            document,
            config,
            suggestions: Suggestions::new(),
            focused: false,
            last_reported,
            change_handler: None,
            key_handler: None,
            action_handler: None,
        };
        let end = composer.document.len();
        composer.push_to_surface(end);
        Ok(composer)
    }

    // -----------------------------------------------------------------------
    // Host callbacks
    // -----------------------------------------------------------------------

    /// Called with the new projection whenever it changes.
    pub fn on_change(&mut self, handler: impl FnMut(&MentionData) + 'static) {
        self.change_handler = Some(Box::new(handler));
    }

    /// Called with every key the composer does not handle itself.
    pub fn on_key_down(&mut self, handler: impl FnMut(&KeyEvent) + 'static) {
        self.key_handler = Some(Box::new(handler));
    }

    /// Called when an action option is selected.
    pub fn on_action(&mut self, handler: impl FnMut(&ActionId) + 'static) {
        self.action_handler = Some(Box::new(handler));
    }

    // -----------------------------------------------------------------------
    // Readers
    // -----------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mention_data(&self) -> MentionData {
        extract(&self.document)
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    pub fn options(&self) -> &[MentionOption] {
        &self.config.options
    }

    pub fn config(&self) -> &MentionConfig {
        &self.config
    }

    pub fn state(&self) -> ComposerState {
        ComposerState {
            focused: self.focused,
            show_placeholder: self.mention_data().display_text.is_empty(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn to_html(&self) -> String {
        to_html(&self.document, &self.config.chip_class_name)
    }

    // -----------------------------------------------------------------------
    // Surface events
    // -----------------------------------------------------------------------

    /// Apply an input event at the surface's current caret or selection.
    pub fn handle_input(&mut self, event: &InputEvent) -> ComposerUpdate {
        log::trace!("input {:?} {:?}", event.input_type, event.data);
        let caret = self.document.snap_caret(self.surface.caret_offset());
        let range = calculate_range(
            &event.input_type,
            caret,
            self.surface.selection_range(),
            self.document.len(),
        );

        let edited = match &event.input_type {
            InputType::InsertText => match event.data.as_deref() {
                Some(text) if !text.is_empty() => self.type_text(range, text),
                _ => return ComposerUpdate::keep(),
            },
            input_type if input_type.is_break() => self.type_break(range),
            input_type if input_type.is_deletion() => self.delete(range),
            InputType::InsertFromPaste => {
                return self.paste_text(event.data.as_deref().unwrap_or_default());
            }
            other => {
                log::trace!("ignoring input type {other:?}");
                return ComposerUpdate::keep();
            }
        };

        match edited {
            Ok(caret) => self.finish_edit(caret),
            Err(e) => self.absorb(e),
        }
    }

    /// Handle a key press. Navigation keys drive the suggestion list while
    /// it is open; everything else goes to the host.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> (KeyHandling, ComposerUpdate) {
        log::trace!("key down {:?}", event.key);
        if self.suggestions.is_open() && !event.modifiers.has_command() {
            let has_options = !self.suggestions.filtered().is_empty();
            match event.key {
                Key::ArrowDown if has_options => {
                    self.suggestions.move_down();
                    return (KeyHandling::Consumed, self.suggestions_update());
                }
                Key::ArrowUp if has_options => {
                    self.suggestions.move_up();
                    return (KeyHandling::Consumed, self.suggestions_update());
                }
                Key::Enter | Key::Tab if has_options && !event.modifiers.shift => {
                    return (KeyHandling::Consumed, self.select_highlighted());
                }
                Key::Escape => {
                    self.suggestions.close();
                    return (
                        KeyHandling::Consumed,
                        ComposerUpdate::keep().with_suggestions(SuggestionUpdate::Close),
                    );
                }
                _ => {}
            }
        }
        if let Some(handler) = self.key_handler.as_mut() {
            handler(event);
        }
        (KeyHandling::Forwarded, ComposerUpdate::keep())
    }

    /// Insert pasted plain text, promoting any option names in it to chips.
    pub fn paste_text(&mut self, text: &str) -> ComposerUpdate {
        if text.is_empty() {
            log::debug!("ignoring empty paste");
            return ComposerUpdate::keep();
        }
        match self.insert_pasted(text) {
            Ok(caret) => self.finish_edit(caret),
            Err(e) => self.absorb(e),
        }
    }

    /// Read the clipboard and paste its text.
    ///
    /// The document and caret are read only once the clipboard resolves, so
    /// the paste lands wherever the caret is by then.
    pub async fn paste_from(&mut self, clipboard: &impl Clipboard) -> ComposerUpdate {
        match clipboard.read_text().await {
            Ok(text) => self.paste_text(&text),
            Err(e) => {
                log::warn!("paste failed: {e}");
                ComposerUpdate::keep()
            }
        }
    }

    /// The caret or selection moved without the text changing.
    pub fn handle_selection_change(&mut self) -> ComposerUpdate {
        let selection = self.surface.selection_range();
        if !selection.is_empty() {
            return self.close_suggestions();
        }

        let caret = selection.end;
        let snapped = self.document.snap_caret(caret);
        let mut update = if snapped != caret {
            log::trace!("caret {caret} snapped to {snapped}");
            self.surface.set_caret_offset(snapped);
            ComposerUpdate::select(snapped)
        } else {
            ComposerUpdate::keep()
        };
        update.suggestion_update = self.refresh_suggestions(snapped);
        update
    }

    pub fn handle_focus(&mut self) -> ComposerUpdate {
        self.focused = true;
        ComposerUpdate::keep()
    }

    pub fn handle_blur(&mut self) -> ComposerUpdate {
        self.focused = false;
        self.close_suggestions()
    }

    pub fn handle_pointer_down_outside(&mut self) -> ComposerUpdate {
        self.close_suggestions()
    }

    // -----------------------------------------------------------------------
    // Suggestion selection
    // -----------------------------------------------------------------------

    /// Select the entry at `index` of the filtered list, e.g. on click.
    pub fn select_option(&mut self, index: usize) -> ComposerUpdate {
        let Some(option) = self.suggestions.filtered().get(index).cloned() else {
            log::debug!("no suggestion at index {index}");
            return ComposerUpdate::keep();
        };
        let query = self.suggestions.query().clone();
        self.suggestions.close();

        let outcome = insert_mention(
            &mut self.document,
            &query,
            &option,
            self.config.trigger,
            self.config.keep_trigger_on_select,
        );
        match outcome {
            Ok(outcome) => {
                if let InsertOutcome::Action { id, .. } = &outcome {
                    log::debug!("running action {id}");
                    if let Some(handler) = self.action_handler.as_mut() {
                        handler(id);
                    }
                }
                let update = self.push_to_surface(outcome.caret());
                self.report(update.with_suggestions(SuggestionUpdate::Close))
            }
            Err(e) => {
                log::debug!("ignoring stale selection: {e}");
                ComposerUpdate::keep().with_suggestions(SuggestionUpdate::Close)
            }
        }
    }

    pub fn select_highlighted(&mut self) -> ComposerUpdate {
        self.select_option(self.suggestions.highlighted())
    }

    // -----------------------------------------------------------------------
    // External value
    // -----------------------------------------------------------------------

    /// Replace the content with canonical text, e.g. a loaded draft.
    pub fn set_canonical_value(&mut self, canonical: &str) -> ComposerUpdate {
        if extract(&self.document).canonical_text == canonical {
            return ComposerUpdate::keep();
        }
        let document = reconstruct(
            canonical,
            &self.config.options,
            self.config.trigger,
            self.config.keep_trigger_on_select,
        );
        self.replace_document(document)
    }

    /// Replace the content with display text, recognising rendered labels.
    pub fn set_display_value(&mut self, display: &str) -> ComposerUpdate {
        if extract(&self.document).display_text == display {
            return ComposerUpdate::keep();
        }
        let document = reconstruct_from_display(
            display,
            &self.config.options,
            self.config.trigger,
            self.config.keep_trigger_on_select,
        );
        self.replace_document(document)
    }

    /// Replace the option list. An open suggestion list is re-filtered.
    pub fn set_options(&mut self, options: Vec<MentionOption>) -> ComposerUpdate {
        self.config.options = options;
        if !self.suggestions.is_open() {
            return ComposerUpdate::keep();
        }
        self.suggestions.refilter(&self.config.options);
        self.suggestions_update()
    }

    pub fn clear(&mut self) -> ComposerUpdate {
        self.replace_document(Document::new())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn type_text(&mut self, range: Range<usize>, text: &str) -> Result<usize> {
        let inserted = self.document.splice(range, segments_from_plain_text(text))?;
        let caret = inserted.end;
        let typed_boundary = text.chars().next_back().is_some_and(char::is_whitespace);
        if typed_boundary && self.config.auto_convert_mentions {
            return self.auto_convert_before(caret);
        }
        Ok(caret)
    }

    fn type_break(&mut self, range: Range<usize>) -> Result<usize> {
        let caret = self.document.splice(range, vec![Segment::LineBreak])?.end;
        if self.config.auto_convert_mentions {
            return self.auto_convert_before(caret);
        }
        Ok(caret)
    }

    fn delete(&mut self, range: Range<usize>) -> Result<usize> {
        if range.is_empty() {
            return Ok(range.start);
        }
        let caret = self.document.delete_range(range)?;
        if self.document.collapse_if_blank() {
            return Ok(0);
        }
        Ok(caret)
    }

    /// Convert the text run that ends at the boundary just typed, keeping
    /// the caret on the same logical position.
    fn auto_convert_before(&mut self, caret: usize) -> Result<usize> {
        let run = self.document.text_run_around(caret.saturating_sub(1));
        if run.is_empty() {
            return Ok(caret);
        }
        let converted = convert_range(
            &mut self.document,
            run.clone(),
            &self.config.options,
            self.config.trigger,
            self.config.keep_trigger_on_select,
        )?;
        Ok(match converted {
            Some(conversion) if caret >= run.start => {
                run.start + conversion.map_offset(caret - run.start)
            }
            _ => caret,
        })
    }

    fn insert_pasted(&mut self, text: &str) -> Result<usize> {
        let caret = self.document.snap_caret(self.surface.caret_offset());
        let selection = self.surface.selection_range();
        let range = if selection.is_empty() {
            caret..caret
        } else {
            selection
        };
        let range = self.document.expand_range(range)?;
        let following = self.document.display_text().chars().nth(range.end);

        let conversion = convert_text(
            text,
            following,
            &self.config.options,
            self.config.trigger,
            self.config.keep_trigger_on_select,
        );
        log::debug!(
            "pasting {} chars with {} mention(s)",
            text.chars().count(),
            conversion.matched()
        );
        Ok(self.document.splice(range, conversion.segments)?.end)
    }

    fn replace_document(&mut self, document: Document) -> ComposerUpdate {
        self.document = document;
        let suggestions = if self.suggestions.is_open() {
            self.suggestions.close();
            SuggestionUpdate::Close
        } else {
            SuggestionUpdate::Keep
        };
        let end = self.document.len();
        let update = self.push_to_surface(end);
        self.report(update.with_suggestions(suggestions))
    }

    fn finish_edit(&mut self, caret: usize) -> ComposerUpdate {
        let mut update = self.push_to_surface(caret);
        update.suggestion_update = self.refresh_suggestions(caret);
        self.report(update)
    }

    /// Show the document on the surface with the caret at `caret`.
    fn push_to_surface(&mut self, caret: usize) -> ComposerUpdate {
        let display_text = self.document.display_text();
        let shown = self.surface.display_text().chars().count();
        self.surface.replace_range(0..shown, &display_text);
        self.surface.set_caret_offset(caret);
        ComposerUpdate::replace_all(display_text, caret)
    }

    fn refresh_suggestions(&mut self, caret: usize) -> SuggestionUpdate {
        let query = detect_in_document(&self.document, caret, self.config.trigger);
        if query.active {
            let before = self.suggestions.clone();
            self.suggestions.open(query, &self.config.options);
            if self.suggestions == before {
                SuggestionUpdate::Keep
            } else {
                SuggestionUpdate::open(&self.suggestions)
            }
        } else if self.suggestions.is_open() {
            self.suggestions.close();
            SuggestionUpdate::Close
        } else {
            SuggestionUpdate::Keep
        }
    }

    fn suggestions_update(&self) -> ComposerUpdate {
        ComposerUpdate::keep().with_suggestions(SuggestionUpdate::open(&self.suggestions))
    }

    fn close_suggestions(&mut self) -> ComposerUpdate {
        if !self.suggestions.is_open() {
            return ComposerUpdate::keep();
        }
        self.suggestions.close();
        ComposerUpdate::keep().with_suggestions(SuggestionUpdate::Close)
    }

    /// Attach the projection to `update` and notify the host, if it changed
    /// since the last report.
    fn report(&mut self, mut update: ComposerUpdate) -> ComposerUpdate {
        let data = extract(&self.document);
        if data != self.last_reported {
            if let Some(handler) = self.change_handler.as_mut() {
                handler(&data);
            }
            self.last_reported = data.clone();
            update.change = Some(data);
        }
        update
    }

    fn absorb(&self, error: MentionError) -> ComposerUpdate {
        log::debug!("ignoring stale input: {error}");
        ComposerUpdate::keep()
    }
}
