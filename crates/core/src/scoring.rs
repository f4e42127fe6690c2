use crate::{
    is_hole_category, is_playable, Aggregate, Category, GameVariant, Player, VariantKind,
    VariantParameters,
};
use serde::{Deserialize, Serialize};

/// Sum of the player's points for `names`. Unset counts as zero.
pub fn upper_total<S: AsRef<str>>(player: &Player, names: &[S]) -> i64 {
    sum_points(player, names.iter().map(AsRef::as_ref))
}

/// `reward` once the upper total reaches `threshold` (inclusive), else zero.
pub fn bonus<S: AsRef<str>>(player: &Player, names: &[S], threshold: i64, reward: i64) -> i64 {
    if upper_total(player, names) >= threshold {
        reward
    } else {
        0
    }
}

/// Sum over the editable lower categories; computed lines never count.
pub fn lower_total(player: &Player, lower: &[Category]) -> i64 {
    sum_points(
        player,
        lower
            .iter()
            .filter(|category| category.is_editable())
            .map(|category| category.name.as_str()),
    )
}

/// Mini-golf total: every `Hole N` key the player has, whatever the current
/// hole count is.
pub fn hole_total(player: &Player) -> i64 {
    sum_points(
        player,
        player
            .scores
            .keys()
            .filter(|name| is_hole_category(name))
            .map(String::as_str),
    )
}

fn sum_points<'a>(player: &Player, names: impl Iterator<Item = &'a str>) -> i64 {
    names.fold(0i64, |total, name| total.saturating_add(player.points(name)))
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub upper_total: i64,
    pub bonus: i64,
    pub lower_total: i64,
    pub grand_total: i64,
}

/// Calculator bound to one variant and one set of parameters.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    kind: VariantKind,
    upper: Vec<String>,
    lower: Vec<Category>,
    bonus_threshold: i64,
    bonus_points: i64,
}

impl ScoreCalculator {
    pub fn new(variant: &GameVariant, params: &VariantParameters) -> Self {
        let upper = variant
            .upper_editable_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let lower = variant
            .lower
            .iter()
            .filter(|category| is_playable(category, params))
            .cloned()
            .collect();
        Self {
            kind: variant.kind,
            upper,
            lower,
            bonus_threshold: params.bonus_threshold,
            bonus_points: params.bonus_points,
        }
    }

    /// For mini golf this is the hole total, so it always equals the grand total.
    pub fn upper_total(&self, player: &Player) -> i64 {
        match self.kind {
            VariantKind::Dice => upper_total(player, &self.upper),
            VariantKind::Holes => hole_total(player),
        }
    }

    pub fn bonus(&self, player: &Player) -> i64 {
        match self.kind {
            VariantKind::Dice => bonus(
                player,
                &self.upper,
                self.bonus_threshold,
                self.bonus_points,
            ),
            VariantKind::Holes => 0,
        }
    }

    pub fn lower_total(&self, player: &Player) -> i64 {
        lower_total(player, &self.lower)
    }

    pub fn grand_total(&self, player: &Player) -> i64 {
        match self.kind {
            VariantKind::Dice => self
                .upper_total(player)
                .saturating_add(self.bonus(player))
                .saturating_add(self.lower_total(player)),
            VariantKind::Holes => hole_total(player),
        }
    }

    pub fn evaluate(&self, aggregate: Aggregate, player: &Player) -> i64 {
        match aggregate {
            Aggregate::UpperTotal => self.upper_total(player),
            Aggregate::Bonus => self.bonus(player),
            Aggregate::LowerTotal => self.lower_total(player),
            Aggregate::GrandTotal => self.grand_total(player),
            Aggregate::HoleTotal => hole_total(player),
        }
    }

    pub fn breakdown(&self, player: &Player) -> ScoreBreakdown {
        ScoreBreakdown {
            upper_total: self.upper_total(player),
            bonus: self.bonus(player),
            lower_total: self.lower_total(player),
            grand_total: self.grand_total(player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryRole;

    const UPPER: [&str; 6] = ["Ones", "Twos", "Threes", "Fours", "Fives", "Sixes"];

    fn player_with(scores: &[(&str, Option<i64>)]) -> Player {
        scores
            .iter()
            .fold(Player::new("1", "Player 1"), |player, (name, value)| {
                player.with_score(name, *value)
            })
    }

    fn sheet() -> GameVariant {
        let mut upper: Vec<Category> = UPPER
            .iter()
            .map(|name| Category::editable(*name, None))
            .collect();
        upper.push(Category::computed("TOTAL", CategoryRole::UpperSubtotal));
        upper.push(Category::computed("BONUS", CategoryRole::Bonus));
        let lower = vec![
            Category::editable("One Pair", Some(12)),
            Category::editable("Three Pairs", Some(33)),
            Category::editable("Chance", Some(36)),
            Category::computed("Grand Total", CategoryRole::GrandTotal),
        ];
        GameVariant::dice("Yatzy", upper, lower)
    }

    #[test]
    fn upper_total_skips_unset_and_absent() {
        let player = player_with(&[("Ones", Some(3)), ("Twos", None), ("Sixes", Some(6))]);
        assert_eq!(upper_total(&player, &UPPER), 9);
    }

    #[test]
    fn bonus_threshold_is_inclusive() {
        let player = player_with(&[("Fives", Some(20)), ("Sixes", Some(30))]);
        assert_eq!(bonus(&player, &UPPER, 50, 35), 35);
        assert_eq!(bonus(&player, &UPPER, 51, 35), 0);
    }

    #[test]
    fn lower_total_ignores_computed_rows() {
        let player = player_with(&[("Chance", Some(20)), ("Grand Total", Some(999))]);
        assert_eq!(lower_total(&player, &sheet().lower), 20);
    }

    #[test]
    fn hole_total_only_counts_hole_keys() {
        let player = player_with(&[
            ("Hole 1", Some(3)),
            ("Hole 2", Some(4)),
            ("Hole 3", None),
            ("Hole 5", Some(0)),
            ("Chance", Some(50)),
        ]);
        assert_eq!(hole_total(&player), 7);
    }

    #[test]
    fn bound_calculator_matches_free_functions() {
        let player = player_with(&[
            ("Ones", Some(5)),
            ("Twos", Some(10)),
            ("Threes", Some(15)),
            ("Fours", Some(20)),
            ("Fives", Some(20)),
            ("Sixes", Some(24)),
            ("One Pair", Some(12)),
            ("Chance", Some(30)),
        ]);
        let calc = ScoreCalculator::new(&sheet(), &VariantParameters::default());
        let breakdown = calc.breakdown(&player);
        assert_eq!(
            breakdown,
            ScoreBreakdown {
                upper_total: 94,
                bonus: 50,
                lower_total: 42,
                grand_total: 186,
            }
        );
        assert_eq!(calc.evaluate(Aggregate::GrandTotal, &player), 186);
        assert_eq!(calc.evaluate(Aggregate::Bonus, &player), 50);
    }

    #[test]
    fn hole_breakdown_counts_holes_beyond_current_count() {
        let player = player_with(&[("Hole 1", Some(3)), ("Hole 12", Some(4))]);
        let calc = ScoreCalculator::new(&GameVariant::mini_golf(9), &VariantParameters::default());
        let breakdown = calc.breakdown(&player);
        assert_eq!(
            breakdown,
            ScoreBreakdown {
                upper_total: 7,
                bonus: 0,
                lower_total: 0,
                grand_total: 7,
            }
        );
        assert_eq!(calc.evaluate(Aggregate::UpperTotal, &player), 7);
    }

    #[test]
    fn fewer_dice_drop_six_dice_rows_from_lower_total() {
        let player = player_with(&[("Three Pairs", Some(30)), ("Chance", Some(20))]);
        let six = ScoreCalculator::new(&sheet(), &VariantParameters::default());
        let five = ScoreCalculator::new(
            &sheet(),
            &VariantParameters {
                dice_count: 5,
                ..VariantParameters::default()
            },
        );
        assert_eq!(six.lower_total(&player), 50);
        assert_eq!(five.lower_total(&player), 20);
    }

    #[test]
    fn hole_variant_grand_total_and_no_bonus() {
        let calc = ScoreCalculator::new(&GameVariant::mini_golf(9), &VariantParameters::default());
        let player = player_with(&[("Hole 1", Some(3)), ("Hole 2", Some(4)), ("Hole 5", Some(0))]);
        assert_eq!(calc.grand_total(&player), 7);
        assert_eq!(calc.bonus(&player), 0);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let player = player_with(&[("Ones", Some(i64::MAX)), ("Twos", Some(1))]);
        assert_eq!(upper_total(&player, &UPPER), i64::MAX);
    }
}
