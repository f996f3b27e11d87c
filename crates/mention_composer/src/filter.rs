// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::mention_option::MentionOption;

/// Keep the options whose label contains `query`, ignoring case.
///
/// Values are never matched. An empty query returns every option, in the
/// original order; matches are not re-ranked.
pub fn filter_options(options: &[MentionOption], query: &str) -> Vec<MentionOption> {
    if query.is_empty() {
        return options.to_vec();
    }
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;

    fn options() -> Vec<MentionOption> {
        vec![
            MentionOption::new("John Doe", "john"),
            MentionOption::new("Jane Smith", "jane"),
            MentionOption::new("Bob Wilson", "bob"),
            MentionOption::action("Invite a guest", "invite"),
        ]
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        assert_eq!(filter_options(&options(), ""), options());
    }

    #[test]
    fn matches_label_substrings_case_insensitively() {
        let filtered = filter_options(&options(), "SMI");
        assert_that!(filtered).has_length(1);
        assert_eq!(filtered[0].label, "Jane Smith");
    }

    #[test]
    fn preserves_order_without_ranking() {
        let labels: Vec<String> = filter_options(&options(), "o")
            .into_iter()
            .map(|option| option.label)
            .collect();
        assert_eq!(labels, vec!["John Doe", "Bob Wilson"]);
    }

    #[test]
    fn does_not_match_values() {
        assert_that!(filter_options(&options(), "jane")).has_length(1);
        assert_that!(filter_options(&options(), "bob")).has_length(1);
        let options = vec![MentionOption::new("Alice", "a1")];
        assert_that!(filter_options(&options, "a1")).is_empty();
    }

    #[test]
    fn action_options_are_filtered_by_label_too() {
        let filtered = filter_options(&options(), "guest");
        assert_eq!(filtered, vec![MentionOption::action("Invite a guest", "invite")]);
    }
}
