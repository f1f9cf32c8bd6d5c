// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixelveil — Reversible Pixel-Arithmetic Image Obfuscation
//
// Entry point. Initialises logging, prompts for an image path, an operation,
// and an integer key, then writes the forward-transformed image and its
// inverse to the configured output paths.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use pixelveil_core::error::Result;
use pixelveil_core::human_errors::humanize_error;
use pixelveil_core::{AppConfig, Operation, PixelveilError};
use pixelveil_image::PixelCipher;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Pixelveil starting");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            let human = humanize_error(&err);
            eprintln!("Error: {}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

/// Interactive encode/decode flow: three prompts, two output files.
///
/// The decode pass runs on the encoded image, not the original, so the
/// decrypted output demonstrates the actual round trip (including any
/// clamping loss from the forward pass).
fn run() -> Result<()> {
    let config = load_config();

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    let image_path = prompt(&mut input, "Enter image path: ")?;
    let operation = Operation::parse(prompt(&mut input, "Enter operation (swap, add, multiply): ")?.trim())?;
    let key = parse_key(prompt(&mut input, "Enter key value: ")?.trim())?;

    let cipher = PixelCipher::open(image_path.trim())?;

    let encoded = cipher.encode(operation, key)?;
    encoded.save(&config.encrypted_output)?;
    println!(
        "Encrypted image saved as {}",
        config.encrypted_output.display()
    );

    let decoded = encoded.decode(operation, key)?;
    decoded.save(&config.decrypted_output)?;
    println!(
        "Decrypted image saved as {}",
        config.decrypted_output.display()
    );

    Ok(())
}

/// Load the optional config file, falling back to defaults.
fn load_config() -> AppConfig {
    match AppConfig::load(AppConfig::FILE_NAME) {
        Ok(config) => {
            tracing::debug!(path = AppConfig::FILE_NAME, "configuration loaded");
            config
        }
        Err(PixelveilError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "config file unreadable — using defaults");
            AppConfig::default()
        }
    }
}

/// Print a prompt and read one line of input.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Parse the key prompt response as a signed integer.
fn parse_key(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|_| PixelveilError::InvalidKey(raw.to_string()))
}
