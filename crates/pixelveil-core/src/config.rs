// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Persistent application settings.
///
/// Loaded from an optional `pixelveil.json` in the working directory; a
/// missing file means defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the forward-transformed image is written.
    pub encrypted_output: PathBuf,
    /// Where the inverse-transformed image is written.
    pub decrypted_output: PathBuf,
}

impl AppConfig {
    /// Name of the optional config file, resolved against the working
    /// directory.
    pub const FILE_NAME: &'static str = "pixelveil.json";

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            encrypted_output: PathBuf::from("encrypted_image.png"),
            decrypted_output: PathBuf::from("decrypted_image.png"),
        }
    }
}
