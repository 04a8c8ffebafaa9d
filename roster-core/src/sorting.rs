//! Numeric reordering of the visible window.
//!
//! The sorter never touches the accumulated list; it borrows the window and
//! returns a new ordering of references.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use roster_model::{Character, NumericField, SortDirection};

/// Sort key for a measure attribute. Unparseable measures read as `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeasureKey(OrderedFloat<f64>);

impl MeasureKey {
    pub fn of(character: &Character, field: NumericField) -> Self {
        MeasureKey(OrderedFloat(character.measure(field)))
    }

    pub fn value(self) -> f64 {
        self.0.into_inner()
    }

    pub fn compare_with_direction(&self, other: &Self, direction: SortDirection) -> Ordering {
        match direction {
            SortDirection::Ascending => self.cmp(other),
            SortDirection::Descending => other.cmp(self),
        }
    }
}

/// Order `window` by `field` in `direction`.
///
/// The sort is stable: records with equal keys (including every record whose
/// measure defaulted to zero) keep their window order in both directions.
pub fn sort_window(
    window: &[Character],
    field: NumericField,
    direction: SortDirection,
) -> Vec<&Character> {
    let mut keyed: Vec<(MeasureKey, &Character)> = window
        .iter()
        .map(|c| (MeasureKey::of(c, field), c))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.compare_with_direction(b, direction));
    keyed.into_iter().map(|(_, c)| c).collect()
}
