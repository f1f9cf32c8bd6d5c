// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pixelveil-image — Pixel-level image obfuscation for Pixelveil.
//
// Provides the PixelCipher: a decoded-image wrapper with a reversible
// per-pixel transform pair (channel swap, additive offset, multiplicative
// scale) and thin open/save glue over the `image` codec crate.

pub mod cipher;

// Re-export the primary struct so callers can use `pixelveil_image::PixelCipher`.
pub use cipher::transform::PixelCipher;
