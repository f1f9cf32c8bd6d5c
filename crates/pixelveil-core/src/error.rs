// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pixelveil.

use thiserror::Error;

/// Top-level error type for all Pixelveil operations.
#[derive(Debug, Error)]
pub enum PixelveilError {
    // -- Transform errors --
    #[error("unsupported operation: {0:?} (expected swap, add, or multiply)")]
    UnsupportedOperation(String),

    #[error("channel swap needs at least 2 channels, image has {0}")]
    InvalidShape(u8),

    #[error("cannot invert a multiply with key 0")]
    DivisionByZero,

    // -- Input errors --
    #[error("invalid key value: {0:?} (expected a signed integer)")]
    InvalidKey(String),

    // -- Codec errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PixelveilError>;
