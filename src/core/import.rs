//! Parser for the `id-name-address-fine` import format.
//!
//! Fields are split on the first three `-`, so the fine keeps any `-` of
//! its own (`1e-5`, `--5`). When the fourth field does not start like a
//! number, the extra dashes belong to the address instead: the fine is the
//! text after the last `-` and an address such as `12-Oak-St` survives
//! intact. Each stage below is a separate check with its own message; the
//! id is checked for shape here and for range later by the manager.

use crate::core::manager::RejectReason;
use crate::domain::model::Patron;
use crate::utils::validation::has_id_shape;
use thiserror::Error;

pub const FIELD_DELIMITER: char = '-';
pub const FIELD_COUNT: usize = 4;

/// Why a single import line was skipped. `Display` is the text that
/// follows `Line <n>: ` in the import report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("Blank line")]
    Blank,

    #[error("Expected 4 fields separated by '-'")]
    FieldCount,

    #[error("ID must be 7 digits")]
    IdShape,

    #[error("ID is not a number")]
    IdNotNumber,

    #[error("Fine is not a number")]
    FineNotNumber,

    #[error(transparent)]
    Rejected(#[from] RejectReason),
}

/// Turn one raw line into a candidate patron. The candidate has passed the
/// format checks only; admission rules belong to the manager.
pub fn parse_line(raw: &str) -> Result<Patron, LineError> {
    let line = raw.trim();
    if line.is_empty() {
        return Err(LineError::Blank);
    }

    let [id_str, name, address, fine_str] = split_fields(line).ok_or(LineError::FieldCount)?;

    if !has_id_shape(&id_str) {
        return Err(LineError::IdShape);
    }

    let id: u32 = id_str.parse().map_err(|_| LineError::IdNotNumber)?;
    let fine: f64 = fine_str.parse().map_err(|_| LineError::FineNotNumber)?;

    Ok(Patron::new(id, name, address, fine))
}

/// Split into the four trimmed fields, or `None` when the line has fewer
/// than three delimiters.
fn split_fields(line: &str) -> Option<[String; FIELD_COUNT]> {
    let mut head = line.splitn(3, FIELD_DELIMITER);
    let id = head.next()?;
    let name = head.next()?;
    let rest = head.next()?;

    let (address, fine) = match rest.split_once(FIELD_DELIMITER) {
        Some((address, fine)) if reads_as_fine(fine) => (address, fine.trim().to_string()),
        _ => split_dashed_address(rest)?,
    };

    Some([
        id.trim().to_string(),
        name.trim().to_string(),
        address.trim().to_string(),
        fine,
    ])
}

/// Whether the fourth field is meant as the fine, numeric or not: it parses
/// whole, or its text up to the next `-` (after an optional sign) does.
fn reads_as_fine(field: &str) -> bool {
    let field = field.trim();
    let unsigned = field.strip_prefix(FIELD_DELIMITER).unwrap_or(field);
    let lead = unsigned.split(FIELD_DELIMITER).next().unwrap_or_default();
    field.parse::<f64>().is_ok() || lead.trim().parse::<f64>().is_ok()
}

/// Address runs to the last `-`. A `-` directly in front of the fine is
/// its sign.
fn split_dashed_address(rest: &str) -> Option<(&str, String)> {
    let (mut address, fine) = rest.rsplit_once(FIELD_DELIMITER)?;
    let mut fine = fine.trim().to_string();
    if let Some(unsigned) = address.trim_end().strip_suffix(FIELD_DELIMITER) {
        address = unsigned;
        fine.insert(0, FIELD_DELIMITER);
    }
    Some((address, fine))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let patron = parse_line("  1234567 - Jane Doe - 12 Oak St - 10.00  ").unwrap();
        assert_eq!(patron.id(), 1_234_567);
        assert_eq!(patron.name(), "Jane Doe");
        assert_eq!(patron.address(), "12 Oak St");
        assert_eq!(patron.fine(), 10.0);
    }

    #[test]
    fn test_address_keeps_delimiters() {
        let patron = parse_line("1234567-Jane-12-Oak-St-10.00").unwrap();
        assert_eq!(patron.name(), "Jane");
        assert_eq!(patron.address(), "12-Oak-St");
        assert_eq!(patron.fine(), 10.0);
    }

    #[test]
    fn test_dash_before_fine_is_a_sign() {
        let patron = parse_line("1234567-Jane-Oak St--5").unwrap();
        assert_eq!(patron.address(), "Oak St");
        assert_eq!(patron.fine(), -5.0);

        let spaced = parse_line("1234567-Jane-12-Oak - -0.01").unwrap();
        assert_eq!(spaced.address(), "12-Oak");
        assert_eq!(spaced.fine(), -0.01);
    }

    #[test]
    fn test_fine_keeps_its_own_delimiters() {
        let patron = parse_line("1234567-Jane-Addr-1e-5").unwrap();
        assert_eq!(patron.address(), "Addr");
        assert_eq!(patron.fine(), 1e-5);

        assert_eq!(parse_line("1234567-Jane-Addr-10-20").unwrap_err(), LineError::FineNotNumber);
        assert_eq!(parse_line("1234567-Jane-Addr--5-3").unwrap_err(), LineError::FineNotNumber);
    }

    #[test]
    fn test_blank_and_whitespace_lines() {
        assert_eq!(parse_line("").unwrap_err(), LineError::Blank);
        assert_eq!(parse_line(" \t ").unwrap_err(), LineError::Blank);
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(parse_line("bad line").unwrap_err(), LineError::FieldCount);
        assert_eq!(parse_line("bad-line").unwrap_err(), LineError::FieldCount);
        assert_eq!(parse_line("1234567-Jane-Oak").unwrap_err(), LineError::FieldCount);
    }

    #[test]
    fn test_id_shape_is_checked_before_parsing() {
        assert_eq!(parse_line("123456a-Jane-Oak-1").unwrap_err(), LineError::IdShape);
        assert_eq!(parse_line("123456-Jane-Oak-1").unwrap_err(), LineError::IdShape);
        assert_eq!(parse_line("-Jane-Oak-1").unwrap_err(), LineError::IdShape);
    }

    #[test]
    fn test_zero_id_passes_shape_check() {
        let patron = parse_line("0000000-Jane-Oak-1").unwrap();
        assert_eq!(patron.id(), 0);
    }

    #[test]
    fn test_fine_must_be_numeric() {
        assert_eq!(parse_line("1234567-Jane-Oak-ten").unwrap_err(), LineError::FineNotNumber);
        assert_eq!(parse_line("1234567-Jane-Oak-").unwrap_err(), LineError::FineNotNumber);
        assert_eq!(parse_line("1234567-Jane--").unwrap_err(), LineError::FineNotNumber);
    }

    #[test]
    fn test_empty_name_still_parses() {
        let patron = parse_line("1234567--Oak-1").unwrap();
        assert_eq!(patron.name(), "");
    }

    #[test]
    fn test_rejection_messages_pass_through() {
        assert_eq!(LineError::from(RejectReason::DuplicateId).to_string(), "Duplicate ID");
        assert_eq!(LineError::Blank.to_string(), "Blank line");
    }
}
