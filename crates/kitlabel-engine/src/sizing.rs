//! Length-driven font sizing
//!
//! Each text role has an ordered list of `(max_len, points)` brackets. The
//! first bracket whose `max_len` is at least the text length wins; longer
//! text falls through to the role's fallback size.
//!
//! Lengths are counted in characters of the display text before any output
//! escaping.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Text roles with their own sizing brackets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum SizingRole {
    /// Brand on the large label
    Brand,
    /// Model on the large label
    Model,
    /// Brand on the small labels
    SmallBrand,
    /// Model on the small labels
    SmallModel,
    /// The three-code kit line
    KitInfo,
    /// Combined fork/rear notes
    Notes,
}

impl SizingRole {
    /// `(max_len inclusive, points)` brackets, shortest first.
    #[must_use]
    pub const fn brackets(&self) -> &'static [(usize, u32)] {
        match self {
            Self::Brand => &[(25, 50), (40, 40), (60, 35), (80, 30)],
            Self::Model => &[
                (25, 50),
                (40, 40),
                (60, 32),
                (80, 26),
                (100, 22),
                (130, 20),
            ],
            Self::SmallBrand => &[(20, 35), (30, 30), (50, 25), (70, 22)],
            Self::SmallModel => &[
                (20, 35),
                (30, 30),
                (50, 24),
                (70, 20),
                (90, 18),
                (120, 16),
            ],
            Self::KitInfo => &[(40, 28), (60, 26), (80, 24), (100, 22), (120, 20)],
            Self::Notes => &[(80, 26), (120, 24), (160, 22), (200, 20), (250, 18)],
        }
    }

    /// Size used when the text is longer than every bracket.
    #[must_use]
    pub const fn fallback(&self) -> u32 {
        match self {
            Self::Brand => 25,
            Self::Model => 18,
            Self::SmallBrand => 18,
            Self::SmallModel => 14,
            Self::KitInfo => 18,
            Self::Notes => 16,
        }
    }

    /// Longest text that still gets a bracketed size.
    #[must_use]
    pub fn ceiling(&self) -> usize {
        self.brackets().last().map_or(0, |(max_len, _)| *max_len)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Model => "model",
            Self::SmallBrand => "small_brand",
            Self::SmallModel => "small_model",
            Self::KitInfo => "kit_info",
            Self::Notes => "notes",
        }
    }
}

/// Point size for `text` in the given role.
#[must_use]
pub fn size_for(role: SizingRole, text: &str) -> u32 {
    size_for_len(role, text.chars().count())
}

/// Point size for a text of `len` characters.
#[must_use]
pub fn size_for_len(role: SizingRole, len: usize) -> u32 {
    role.brackets()
        .iter()
        .find(|(max_len, _)| *max_len >= len)
        .map_or_else(|| role.fallback(), |(_, points)| *points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn text(len: usize) -> String {
        "X".repeat(len)
    }

    #[test]
    fn test_brand_boundaries() {
        assert_eq!(size_for(SizingRole::Brand, &text(0)), 50);
        assert_eq!(size_for(SizingRole::Brand, &text(25)), 50);
        assert_eq!(size_for(SizingRole::Brand, &text(26)), 40);
        assert_eq!(size_for(SizingRole::Brand, &text(40)), 40);
        assert_eq!(size_for(SizingRole::Brand, &text(41)), 35);
        assert_eq!(size_for(SizingRole::Brand, &text(60)), 35);
        assert_eq!(size_for(SizingRole::Brand, &text(61)), 30);
        assert_eq!(size_for(SizingRole::Brand, &text(80)), 30);
        assert_eq!(size_for(SizingRole::Brand, &text(81)), 25);
    }

    #[test]
    fn test_model_boundaries() {
        let cases = [
            (25, 50),
            (26, 40),
            (40, 40),
            (41, 32),
            (60, 32),
            (61, 26),
            (80, 26),
            (81, 22),
            (100, 22),
            (101, 20),
            (130, 20),
            (131, 18),
        ];
        for (len, points) in cases {
            assert_eq!(size_for_len(SizingRole::Model, len), points, "len {len}");
        }
    }

    #[test]
    fn test_small_brand_boundaries() {
        let cases = [
            (20, 35),
            (21, 30),
            (30, 30),
            (31, 25),
            (50, 25),
            (51, 22),
            (70, 22),
            (71, 18),
        ];
        for (len, points) in cases {
            assert_eq!(size_for_len(SizingRole::SmallBrand, len), points, "len {len}");
        }
    }

    #[test]
    fn test_small_model_boundaries() {
        let cases = [
            (20, 35),
            (21, 30),
            (30, 30),
            (31, 24),
            (50, 24),
            (51, 20),
            (70, 20),
            (71, 18),
            (90, 18),
            (91, 16),
            (120, 16),
            (121, 14),
        ];
        for (len, points) in cases {
            assert_eq!(size_for_len(SizingRole::SmallModel, len), points, "len {len}");
        }
    }

    #[test]
    fn test_kit_info_boundaries() {
        let cases = [
            (40, 28),
            (41, 26),
            (60, 26),
            (61, 24),
            (80, 24),
            (81, 22),
            (100, 22),
            (101, 20),
            (120, 20),
            (121, 18),
        ];
        for (len, points) in cases {
            assert_eq!(size_for_len(SizingRole::KitInfo, len), points, "len {len}");
        }
    }

    #[test]
    fn test_notes_boundaries() {
        let cases = [
            (0, 26),
            (80, 26),
            (81, 24),
            (120, 24),
            (121, 22),
            (160, 22),
            (161, 20),
            (200, 20),
            (201, 18),
            (250, 18),
            (251, 16),
            (337, 16),
        ];
        for (len, points) in cases {
            assert_eq!(size_for_len(SizingRole::Notes, len), points, "len {len}");
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 25 two-byte characters still fit the first brand bracket.
        let brand = "É".repeat(25);
        assert_eq!(brand.len(), 50);
        assert_eq!(size_for(SizingRole::Brand, &brand), 50);
    }

    #[test]
    fn test_brackets_are_ordered_and_fallback_is_smallest() {
        for role in SizingRole::iter() {
            let brackets = role.brackets();
            for pair in brackets.windows(2) {
                assert!(pair[0].0 < pair[1].0, "{role:?} lengths ascend");
                assert!(pair[0].1 > pair[1].1, "{role:?} sizes descend");
            }
            assert!(role.fallback() < brackets[brackets.len() - 1].1);
        }
        assert_eq!(SizingRole::Notes.ceiling(), 250);
    }
}
