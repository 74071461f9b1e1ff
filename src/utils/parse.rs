// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Token-level parsing helpers for line-oriented mesh formats

use crate::error::{Error, Result};

/// Pull the next whitespace token off a card, failing if the card is truncated
pub fn next_token<'a, I>(tokens: &mut I, card: &str) -> Result<&'a str>
where
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .ok_or_else(|| Error::invalid_data(format!("truncated {} card", card)))
}

/// Parse a floating-point token
pub fn parse_f64(token: &str, card: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| Error::invalid_data(format!("bad number '{}' in {} card", token, card)))
}

/// Parse a non-negative integer token
pub fn parse_u64(token: &str, card: &str) -> Result<u64> {
    token
        .parse::<u64>()
        .map_err(|_| Error::invalid_data(format!("bad identifier '{}' in {} card", token, card)))
}

/// Parse a count token (section sizes, column counts)
pub fn parse_usize(token: &str, card: &str) -> Result<usize> {
    token
        .parse::<usize>()
        .map_err(|_| Error::invalid_data(format!("bad count '{}' in {} card", token, card)))
}
