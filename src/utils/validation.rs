use crate::utils::error::{PatronError, Result};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_ID: u32 = 1_000_000;
pub const MAX_ID: u32 = 9_999_999;
pub const MIN_FINE: f64 = 0.0;
pub const MAX_FINE: f64 = 250.0;

// ASCII only: `\d` would also admit other Unicode digits.
static ID_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7}$").expect("id pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Exactly seven ASCII digits. Says nothing about the numeric range.
pub fn has_id_shape(value: &str) -> bool {
    ID_SHAPE.is_match(value)
}

pub fn is_valid_id(id: u32) -> bool {
    (MIN_ID..=MAX_ID).contains(&id)
}

/// Inclusive on both ends. NaN is out of range.
pub fn is_valid_fine(fine: f64) -> bool {
    (MIN_FINE..=MAX_FINE).contains(&fine)
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if is_blank(path) {
        return Err(PatronError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PatronError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
