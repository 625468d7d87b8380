//! Label multiplicity per kit unit

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::ops::{Add, AddAssign};

use kitlabel_utils::types::KitType;

/// Document counts for a kit, an entry, or a whole batch.
///
/// Serializes with the derived `total_small` and `grand_total` alongside the
/// three stored counts; deserialization reads the stored counts only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct LabelCounts {
    pub big: u64,
    pub small_fork: u64,
    pub small_shock: u64,
}

impl LabelCounts {
    #[must_use]
    pub const fn new(big: u64, small_fork: u64, small_shock: u64) -> Self {
        Self {
            big,
            small_fork,
            small_shock,
        }
    }

    #[must_use]
    pub const fn total_small(&self) -> u64 {
        self.small_fork + self.small_shock
    }

    #[must_use]
    pub const fn grand_total(&self) -> u64 {
        self.big + self.total_small()
    }

    /// Every component multiplied by `factor`.
    #[must_use]
    pub const fn times(&self, factor: u64) -> Self {
        Self {
            big: self.big * factor,
            small_fork: self.small_fork * factor,
            small_shock: self.small_shock * factor,
        }
    }
}

impl Serialize for LabelCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LabelCounts", 5)?;
        state.serialize_field("big", &self.big)?;
        state.serialize_field("small_fork", &self.small_fork)?;
        state.serialize_field("small_shock", &self.small_shock)?;
        state.serialize_field("total_small", &self.total_small())?;
        state.serialize_field("grand_total", &self.grand_total())?;
        state.end()
    }
}

impl Add for LabelCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            big: self.big + rhs.big,
            small_fork: self.small_fork + rhs.small_fork,
            small_shock: self.small_shock + rhs.small_shock,
        }
    }
}

impl AddAssign for LabelCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for LabelCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Documents needed for one unit of a kit type.
#[must_use]
pub const fn rule_for(kit_type: KitType) -> LabelCounts {
    match kit_type {
        KitType::Fork => LabelCounts::new(1, 2, 0),
        KitType::Shock => LabelCounts::new(1, 0, 1),
        KitType::Combi => LabelCounts::new(1, 2, 1),
    }
}

/// Documents needed for `quantity` units of a kit type.
#[must_use]
pub const fn expand(kit_type: KitType, quantity: u32) -> LabelCounts {
    rule_for(kit_type).times(quantity as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rules() {
        assert_eq!(rule_for(KitType::Fork), LabelCounts::new(1, 2, 0));
        assert_eq!(rule_for(KitType::Shock), LabelCounts::new(1, 0, 1));
        assert_eq!(rule_for(KitType::Combi), LabelCounts::new(1, 2, 1));
    }

    #[test]
    fn test_expand_totals() {
        assert_eq!(expand(KitType::Fork, 3), LabelCounts::new(3, 6, 0));
        assert_eq!(expand(KitType::Combi, 2), LabelCounts::new(2, 4, 2));
        assert_eq!(expand(KitType::Shock, 99), LabelCounts::new(99, 0, 99));
        assert_eq!(expand(KitType::Combi, 0), LabelCounts::default());
    }

    #[test]
    fn test_totals_and_sum() {
        let counts: LabelCounts = KitType::iter().map(|kit| expand(kit, 1)).sum();
        assert_eq!(counts, LabelCounts::new(3, 4, 2));
        assert_eq!(counts.total_small(), 6);
        assert_eq!(counts.grand_total(), 9);
    }

    #[test]
    fn test_every_kit_gets_exactly_one_large_label() {
        for kit in KitType::iter() {
            assert_eq!(rule_for(kit).big, 1);
        }
    }

    #[test]
    fn test_serialized_counts_carry_totals() {
        let counts = expand(KitType::Combi, 2);
        let json = serde_json::to_value(counts).unwrap();

        assert_eq!(json["total_small"], 6);
        assert_eq!(json["grand_total"], 8);

        let back: LabelCounts = serde_json::from_value(json).unwrap();
        assert_eq!(back, counts);
    }
}
