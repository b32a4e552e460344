use std::collections::BTreeSet;

use super::model::Conditions;
use crate::error::{PlateError, PlateResult};

// ---------------------------------------------------------------------------
// Reference controls drawn on every panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ControlRole {
    Positive,
    Negative,
}

impl ControlRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlRole::Positive => "positive",
            ControlRole::Negative => "negative",
        }
    }
}

/// A condition shown as a fixed reference trace instead of its own panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub role: ControlRole,
    /// Index into the condition list.
    pub index: usize,
    /// Legend label; defaults to the condition name.
    pub label: String,
}

impl Reference {
    pub fn new(role: ControlRole, index: usize, label: Option<&str>, conditions: &Conditions) -> PlateResult<Self> {
        let name = conditions
            .get(index)
            .ok_or(PlateError::ControlIndexOutOfRange {
                role: role.as_str(),
                index,
                count: conditions.len(),
            })?;
        Ok(Self {
            role,
            index,
            label: label.unwrap_or(name).to_string(),
        })
    }
}

/// Indices of the conditions that get their own panel, in list order.
///
/// Reference conditions are excluded; every other condition is kept.
pub fn panel_indices(conditions: &Conditions, references: &[Reference]) -> Vec<usize> {
    let excluded: BTreeSet<usize> = references.iter().map(|r| r.index).collect();
    (0..conditions.len())
        .filter(|i| !excluded.contains(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions() -> Conditions {
        Conditions::new(
            ["A", "B", "MG1655", "C", "DH5a + cre"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    #[test]
    fn no_references_keeps_everything() {
        assert_eq!(panel_indices(&conditions(), &[]), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn references_are_excluded_from_panels() {
        let c = conditions();
        let refs = vec![
            Reference::new(ControlRole::Positive, 2, Some("MG1655 Control"), &c).unwrap(),
            Reference::new(ControlRole::Negative, 4, None, &c).unwrap(),
        ];
        assert_eq!(panel_indices(&c, &refs), vec![0, 1, 3]);
        assert_eq!(refs[0].label, "MG1655 Control");
        assert_eq!(refs[1].label, "DH5a + cre");
    }

    #[test]
    fn out_of_range_reference_is_rejected() {
        let err = Reference::new(ControlRole::Negative, 12, None, &conditions()).unwrap_err();
        assert_eq!(
            err,
            PlateError::ControlIndexOutOfRange {
                role: "negative",
                index: 12,
                count: 5
            }
        );
    }
}
