// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Render a [`Document`] as the markup a contenteditable surface mounts.

use crate::document::Document;
use crate::segment::Segment;

/// Render `document` as HTML. Chips become non-editable spans carrying
/// their value and label as data attributes; line breaks become `<br>`.
pub fn to_html(document: &Document, chip_class_name: &str) -> String {
    let mut html = String::new();
    for segment in document.segments() {
        match segment {
            Segment::Text(text) => html.push_str(&html_escape::encode_text(text)),
            Segment::Mention(mention) => {
                html.push_str(&format!(
                    "<span class=\"{}\" data-value=\"{}\" data-label=\"{}\" contenteditable=\"false\">",
                    html_escape::encode_double_quoted_attribute(chip_class_name),
                    html_escape::encode_double_quoted_attribute(&mention.value),
                    html_escape::encode_double_quoted_attribute(&mention.label),
                ));
                html.push_str(&html_escape::encode_text(&mention.rendered_label()));
                html.push_str("</span>");
            }
            Segment::LineBreak => html.push_str("<br>"),
        }
    }
    html
}
