use crate::error::{PlateError, PlateResult};

// ---------------------------------------------------------------------------
// Column-letter codec (bijective base-26: A=1 … Z=26, AA=27, …)
// ---------------------------------------------------------------------------

/// Convert a 1-based column index to its spreadsheet label.
///
/// There is no digit for zero, so index 0 has no label and is rejected.
pub fn encode(index: usize) -> PlateResult<String> {
    if index == 0 {
        return Err(PlateError::InvalidColumnIndex(0));
    }
    let mut letters = Vec::new();
    let mut n = index;
    while n > 0 {
        let remainder = (n - 1) % 26;
        letters.push((b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }
    Ok(letters.into_iter().rev().collect())
}

/// Convert a spreadsheet column label (case-insensitive) to its 1-based index.
pub fn decode(label: &str) -> PlateResult<usize> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(PlateError::InvalidColumnLabel(label.to_string()));
    }
    trimmed.chars().try_fold(0usize, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return Err(PlateError::InvalidColumnLabel(label.to_string()));
        }
        let value = (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        acc.checked_mul(26)
            .and_then(|v| v.checked_add(value))
            .ok_or_else(|| PlateError::InvalidColumnLabel(label.to_string()))
    })
}

/// 0-based column offset for a label, as used by sheet coordinates.
pub fn offset(label: &str) -> PlateResult<u32> {
    let index = decode(label)?;
    u32::try_from(index - 1).map_err(|_| PlateError::InvalidColumnLabel(label.to_string()))
}

/// A1-style reference for 0-based `(row, col)` sheet coordinates.
pub fn cell_reference(row: u32, col: u32) -> String {
    // col + 1 is always >= 1, so encoding cannot fail.
    let label = encode(col as usize + 1).unwrap_or_default();
    format!("{label}{}", row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_labels() {
        assert_eq!(encode(1).unwrap(), "A");
        assert_eq!(encode(26).unwrap(), "Z");
        assert_eq!(encode(27).unwrap(), "AA");
        assert_eq!(encode(52).unwrap(), "AZ");
        assert_eq!(encode(53).unwrap(), "BA");
        assert_eq!(encode(702).unwrap(), "ZZ");
        assert_eq!(encode(703).unwrap(), "AAA");
    }

    #[test]
    fn zero_has_no_label() {
        assert_eq!(encode(0), Err(PlateError::InvalidColumnIndex(0)));
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(decode("d").unwrap(), 4);
        assert_eq!(decode("aA").unwrap(), 27);
        assert_eq!(decode("ZZ").unwrap(), 702);
    }

    #[test]
    fn decode_rejects_non_letters() {
        assert!(matches!(decode("A1"), Err(PlateError::InvalidColumnLabel(_))));
        assert!(matches!(decode(""), Err(PlateError::InvalidColumnLabel(_))));
    }

    #[test]
    fn round_trip_over_first_thousand() {
        for n in 1..=1000 {
            let label = encode(n).unwrap();
            assert!(label.chars().all(|c| c.is_ascii_uppercase()));
            assert_eq!(decode(&label).unwrap(), n, "label {label}");
        }
    }

    #[test]
    fn cell_reference_is_one_based() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(61, 3), "D62");
        assert_eq!(cell_reference(9, 26), "AA10");
    }
}
