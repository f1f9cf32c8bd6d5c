// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Pixelveil cipher.

use serde::{Deserialize, Serialize};

use crate::error::{PixelveilError, Result};

/// Per-pixel operation applied when encoding an image.
///
/// The set is closed: user input is parsed into this enum exactly once, so
/// every downstream match is exhaustive and there is no runtime "unknown
/// operation" path inside the transform loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Exchange channel 0 and channel 1 of every pixel. Self-inverse; the
    /// key is ignored.
    Swap,
    /// Add the key to every sample, clamped to [0, 255].
    Add,
    /// Multiply every sample by the key, clamped to [0, 255].
    Multiply,
}

impl Operation {
    /// Parse a user-supplied operation keyword.
    ///
    /// Matching is case-insensitive. Anything outside {swap, add, multiply}
    /// is rejected here, before any pixel work starts.
    pub fn parse(input: &str) -> Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "swap" => Ok(Self::Swap),
            "add" => Ok(Self::Add),
            "multiply" => Ok(Self::Multiply),
            _ => Err(PixelveilError::UnsupportedOperation(input.to_string())),
        }
    }

    /// Keyword form, as accepted by [`parse`](Self::parse).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swap => "swap",
            Self::Add => "add",
            Self::Multiply => "multiply",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
