use serde::{Deserialize, Serialize};

/// Dice count the full sheet is designed for. Fewer dice drop the rows that
/// need all of them.
pub const CANONICAL_DICE_COUNT: u8 = 6;
pub const MIN_DICE_COUNT: u8 = 5;
pub const MIN_HOLES: u32 = 1;
pub const MAX_HOLES: u32 = 36;

/// Per-session game parameters. Defaults live here and nowhere else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VariantParameters {
    pub dice_count: u8,
    pub bonus_threshold: i64,
    pub bonus_points: i64,
    pub holes: u32,
}

impl Default for VariantParameters {
    fn default() -> Self {
        Self {
            dice_count: CANONICAL_DICE_COUNT,
            bonus_threshold: 84,
            bonus_points: 50,
            holes: 9,
        }
    }
}

impl VariantParameters {
    /// Clamp every field into its allowed range.
    pub fn sanitized(self) -> Self {
        Self {
            dice_count: self.dice_count.clamp(MIN_DICE_COUNT, CANONICAL_DICE_COUNT),
            bonus_threshold: self.bonus_threshold.max(0),
            bonus_points: self.bonus_points.max(0),
            holes: self.holes.clamp(MIN_HOLES, MAX_HOLES),
        }
    }

    pub fn has_all_dice(&self) -> bool {
        self.dice_count >= CANONICAL_DICE_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_sheet() {
        let params = VariantParameters::default();
        assert_eq!(params.dice_count, 6);
        assert_eq!(params.bonus_threshold, 84);
        assert_eq!(params.bonus_points, 50);
        assert_eq!(params.holes, 9);
        assert!(params.has_all_dice());
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let params = VariantParameters {
            dice_count: 9,
            bonus_threshold: -4,
            bonus_points: -1,
            holes: 0,
        }
        .sanitized();
        assert_eq!(params.dice_count, 6);
        assert_eq!(params.bonus_threshold, 0);
        assert_eq!(params.bonus_points, 0);
        assert_eq!(params.holes, 1);

        let params = VariantParameters {
            dice_count: 2,
            holes: 99,
            ..VariantParameters::default()
        }
        .sanitized();
        assert_eq!(params.dice_count, 5);
        assert_eq!(params.holes, 36);
    }
}
