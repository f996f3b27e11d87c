// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Linearise a [`Document`] into its display and canonical projections.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::segment::Segment;

/// One chip in the extracted output. Offsets are `char` offsets into the
/// display text, so they stay valid for highlighting what the user sees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionMetadata {
    pub label: String,
    pub value: String,
    pub start_index: usize,
    pub end_index: usize,
}

/// The dual projection handed to the host on every change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionData {
    /// What the user sees: chips contribute their rendered label.
    pub display_text: String,
    /// What gets stored: chips contribute their value.
    pub canonical_text: String,
    pub mentions: Vec<MentionMetadata>,
}

/// Walk the segments once, building both strings in lock-step.
///
/// Does not modify the document. A document that holds nothing but one
/// structural break projects to empty strings.
pub fn extract(document: &Document) -> MentionData {
    let mut data = MentionData::default();
    if matches!(document.segments(), [Segment::LineBreak]) {
        return data;
    }

    let mut display_cursor = 0;
    for segment in document.segments() {
        match segment {
            Segment::Text(text) => {
                data.display_text.push_str(text);
                data.canonical_text.push_str(text);
            }
            Segment::Mention(mention) => {
                let start_index = display_cursor;
                data.display_text.push_str(&mention.rendered_label());
                data.canonical_text.push_str(&mention.value);
                data.mentions.push(MentionMetadata {
                    label: mention.label.clone(),
                    value: mention.value.clone(),
                    start_index,
                    end_index: start_index + mention.display_len(),
                });
            }
            Segment::LineBreak => {
                data.display_text.push('\n');
                data.canonical_text.push('\n');
            }
        }
        display_cursor += segment.display_len();
    }
    data
}

/// Run the normalising cleanup pass, then [`extract`].
pub fn extract_normalized(document: &mut Document) -> MentionData {
    document.collapse_if_blank();
    extract(document)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn chip(label: &str, value: &str) -> Segment {
        Segment::mention(label, value, '@', true)
    }

    #[test]
    fn empty_document_extracts_empty_strings() {
        assert_eq!(extract(&Document::new()), MentionData::default());
    }

    #[test]
    fn text_only_is_identical_in_both_projections() {
        let data = extract(&Document::from_plain_text("Hello world"));
        assert_eq!(data.display_text, "Hello world");
        assert_eq!(data.canonical_text, "Hello world");
        assert!(data.mentions.is_empty());
    }

    #[test]
    fn chips_diverge_the_two_projections() {
        let document = Document::from_segments(vec![
            Segment::text("Hello "),
            chip("John Doe", "john"),
            Segment::text(" and "),
            chip("Jane Smith", "jane"),
        ]);
        let data = extract(&document);
        assert_eq!(data.display_text, "Hello @John Doe and @Jane Smith");
        assert_eq!(data.canonical_text, "Hello john and jane");
        assert_eq!(
            data.mentions,
            vec![
                MentionMetadata {
                    label: "John Doe".into(),
                    value: "john".into(),
                    start_index: 6,
                    end_index: 15,
                },
                MentionMetadata {
                    label: "Jane Smith".into(),
                    value: "jane".into(),
                    start_index: 20,
                    end_index: 31,
                },
            ]
        );
    }

    #[test]
    fn line_breaks_fold_to_one_newline_each() {
        let document = Document::from_segments(vec![
            Segment::text("Hello "),
            chip("John Doe", "john"),
            Segment::LineBreak,
            Segment::text("How are you?"),
        ]);
        let data = extract(&document);
        assert_eq!(data.display_text, "Hello @John Doe\nHow are you?");
        assert_eq!(data.canonical_text, "Hello john\nHow are you?");
        assert_eq!(data.mentions[0].start_index, 6);
        assert_eq!(data.mentions[0].end_index, 15);
    }

    #[test]
    fn repeated_breaks_are_kept() {
        let text = indoc! {"
            Line 1

            Line 3


            Line 6"};
        let data = extract(&Document::from_plain_text(text));
        assert_eq!(data.display_text, "Line 1\n\nLine 3\n\n\nLine 6");
        assert_eq!(data.canonical_text, data.display_text);
    }

    #[test]
    fn lone_break_projects_to_nothing_without_mutation() {
        let document = Document::from_plain_text("\n");
        assert_eq!(extract(&document), MentionData::default());
        assert_eq!(document.segments(), &[Segment::LineBreak]);
    }

    #[test]
    fn normalized_extraction_drops_the_lone_break() {
        let mut document = Document::from_plain_text("\n");
        assert_eq!(extract_normalized(&mut document), MentionData::default());
        assert!(document.is_empty());
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let document = Document::from_segments(vec![
            Segment::text("h\u{00E9} "),
            chip("Zo\u{00EB}", "zoe"),
        ]);
        let data = extract(&document);
        assert_eq!(data.mentions[0].start_index, 3);
        assert_eq!(data.mentions[0].end_index, 7);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let document = Document::from_segments(vec![chip("Alice", "a1")]);
        let json = serde_json::to_value(extract(&document)).unwrap();
        assert_eq!(json["displayText"], "@Alice");
        assert_eq!(json["canonicalText"], "a1");
        assert_eq!(json["mentions"][0]["startIndex"], 0);
        assert_eq!(json["mentions"][0]["endIndex"], 6);
    }
}
