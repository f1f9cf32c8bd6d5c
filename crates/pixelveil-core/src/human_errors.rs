// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the CLI boundary.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The taxonomy uses three severity levels that drive how a failure is
// presented.

use crate::error::PixelveilError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// May not recur on a second attempt (disk hiccup, partial write).
    Transient,
    /// User must change their input (operation keyword, key, file path).
    ActionRequired,
    /// Cannot be fixed by retrying or new input — damaged file, bad format.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

/// Convert a `PixelveilError` into a `HumanError` anyone can act on.
pub fn humanize_error(err: &PixelveilError) -> HumanError {
    match err {
        // -- Transform errors --
        PixelveilError::UnsupportedOperation(op) => HumanError {
            message: "That operation isn't supported.".into(),
            suggestion: format!("Enter swap, add, or multiply. (You entered: {op})"),
            severity: Severity::ActionRequired,
        },

        PixelveilError::InvalidShape(channels) => HumanError {
            message: "This image can't be channel-swapped.".into(),
            suggestion: format!(
                "Channel swap exchanges the first two colour channels, but this image has only \
                 {channels}. Try a colour image, or use add or multiply instead."
            ),
            severity: Severity::ActionRequired,
        },

        PixelveilError::DivisionByZero => HumanError {
            message: "A key of 0 can't be reversed for multiply.".into(),
            suggestion: "Multiplying every pixel by 0 erases the image, so there is nothing to \
                         divide back. Pick any non-zero key."
                .into(),
            severity: Severity::ActionRequired,
        },

        // -- Input errors --
        PixelveilError::InvalidKey(raw) => HumanError {
            message: "The key must be a whole number.".into(),
            suggestion: format!("Enter a plain integer such as 7 or -40. (You entered: {raw})"),
            severity: Severity::ActionRequired,
        },

        // -- Codec errors --
        PixelveilError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a \
                         JPEG or PNG first."
                .into(),
            severity: Severity::Permanent,
        },

        // -- Storage --
        PixelveilError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again."
                        .into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to read or write that file.".into(),
                    suggestion: "Check the file permissions, or try a different output location."
                        .into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may \
                                 be full."
                        .into(),
                    severity: Severity::Transient,
                }
            }
        }

        PixelveilError::Serialization(_) => HumanError {
            message: "The pixelveil.json settings file couldn't be understood.".into(),
            suggestion: "Fix the JSON in pixelveil.json, or delete the file to go back to the \
                         defaults."
                .into(),
            severity: Severity::ActionRequired,
        },
    }
}
