// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::error::{MentionError, Result};

/// Source of pasted text. Reading may suspend, e.g. while the browser asks
/// the user for clipboard permission.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn read_text(&self) -> Result<String>;
}

/// A clipboard that always yields the same result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticClipboard {
    contents: Result<String>,
}

impl StaticClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Ok(text.into()),
        }
    }

    /// A clipboard whose every read fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            contents: Err(MentionError::ClipboardUnavailable(reason.into())),
        }
    }
}

impl Clipboard for StaticClipboard {
    async fn read_text(&self) -> Result<String> {
        self.contents.clone()
    }
}
