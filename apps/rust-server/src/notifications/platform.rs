// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Push service classification.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Browser family inferred from the push service endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    ChromeBased,
    Mozilla,
    Apple,
    Edge,
    Unknown,
}

/// Endpoint markers in precedence order. An endpoint containing several
/// markers belongs to the first one listed here.
const MARKERS: [(&str, Platform); 4] = [
    ("edge.com", Platform::Edge),
    ("apple.com", Platform::Apple),
    ("mozilla.com", Platform::Mozilla),
    ("googleapis.com", Platform::ChromeBased),
];

impl Platform {
    /// Classify a push endpoint by substring match.
    ///
    /// Matching is on the whole endpoint string, not the host, so a marker in
    /// the path counts too.
    pub fn classify(endpoint: &str) -> Self {
        MARKERS
            .iter()
            .find(|(marker, _)| endpoint.contains(marker))
            .map(|(_, platform)| *platform)
            .unwrap_or(Platform::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::ChromeBased => "chromeBased",
            Platform::Mozilla => "mozilla",
            Platform::Apple => "apple",
            Platform::Edge => "edge",
            Platform::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
