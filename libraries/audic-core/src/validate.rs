//! Argument validation shared by every player variant
//!
//! All checks run synchronously at the call site, before any backing-player
//! interaction or state change.

use crate::error::{AudicError, Result};

/// Normalize a media source locator
///
/// Any string is accepted; an empty one means "no source".
pub fn source(src: Option<&str>) -> Option<&str> {
    src.filter(|src| !src.is_empty())
}

/// Validate a volume level in `[0, 1]`
pub fn volume(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AudicError::invalid_argument(format!(
            "Expected volume to be a number, got {}",
            value
        )));
    }

    if !(0.0..=1.0).contains(&value) {
        return Err(AudicError::invalid_argument(format!(
            "Expected volume to be in range [0, 1], got {}",
            value
        )));
    }

    Ok(())
}

/// Validate a seek target in whole seconds, returning it as an integer
pub fn current_time(value: f64) -> Result<u64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(AudicError::invalid_argument(format!(
            "Expected current time to be an integer, got {}",
            value
        )));
    }

    if value < 0.0 {
        return Err(AudicError::invalid_argument(format!(
            "Expected current time to be >= 0, got {}",
            value
        )));
    }

    Ok(value as u64)
}
