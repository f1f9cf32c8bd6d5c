// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cipher module — the reversible per-pixel transform pair.

pub mod transform;

pub use transform::PixelCipher;
