use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

/// Minimum points per tier, expected non-decreasing from bronze to diamond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoyaltyThresholds {
    pub bronze: u64,
    pub silver: u64,
    pub gold: u64,
    pub diamond: u64,
}

impl LoyaltyThresholds {
    pub fn is_monotonic(&self) -> bool {
        self.bronze <= self.silver && self.silver <= self.gold && self.gold <= self.diamond
    }

    fn ladder(&self) -> [(LoyaltyTier, u64); 4] {
        [
            (LoyaltyTier::Diamond, self.diamond),
            (LoyaltyTier::Gold, self.gold),
            (LoyaltyTier::Silver, self.silver),
            (LoyaltyTier::Bronze, self.bronze),
        ]
    }
}

/// Highest tier whose minimum is reached; bronze below every threshold.
pub fn tier(points: u64, thresholds: &LoyaltyThresholds) -> LoyaltyTier {
    thresholds
        .ladder()
        .into_iter()
        .find(|(_, min)| points >= *min)
        .map_or(LoyaltyTier::Bronze, |(tier, _)| tier)
}

/// The next tier above the current one and the points still missing to reach it.
pub fn next_tier(points: u64, thresholds: &LoyaltyThresholds) -> Option<(LoyaltyTier, u64)> {
    let current = tier(points, thresholds);
    thresholds
        .ladder()
        .into_iter()
        .rev()
        .find(|(tier, min)| *tier > current && *min > points)
        .map(|(tier, min)| (tier, min - points))
}

/// Points granted for an order total: `floor(total * rate)`.
pub fn earned_points(total: Decimal, rate: Decimal) -> u64 {
    (total * rate).floor().to_u64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: LoyaltyThresholds = LoyaltyThresholds {
        bronze: 0,
        silver: 500,
        gold: 850,
        diamond: 1350,
    };

    #[test]
    fn picks_highest_reached_tier() {
        assert_eq!(tier(0, &DEFAULTS), LoyaltyTier::Bronze);
        assert_eq!(tier(499, &DEFAULTS), LoyaltyTier::Bronze);
        assert_eq!(tier(500, &DEFAULTS), LoyaltyTier::Silver);
        assert_eq!(tier(900, &DEFAULTS), LoyaltyTier::Gold);
        assert_eq!(tier(1350, &DEFAULTS), LoyaltyTier::Diamond);
        assert_eq!(tier(u64::MAX, &DEFAULTS), LoyaltyTier::Diamond);
    }

    #[test]
    fn defaults_to_bronze_below_first_threshold() {
        let thresholds = LoyaltyThresholds {
            bronze: 100,
            ..DEFAULTS
        };
        assert_eq!(tier(10, &thresholds), LoyaltyTier::Bronze);
    }

    #[test]
    fn next_tier_reports_missing_points() {
        assert_eq!(next_tier(900, &DEFAULTS), Some((LoyaltyTier::Diamond, 450)));
        assert_eq!(next_tier(0, &DEFAULTS), Some((LoyaltyTier::Silver, 500)));
        assert_eq!(next_tier(2000, &DEFAULTS), None);
    }

    #[test]
    fn monotonic_check() {
        assert!(DEFAULTS.is_monotonic());
        let broken = LoyaltyThresholds {
            gold: 400,
            ..DEFAULTS
        };
        assert!(!broken.is_monotonic());
    }

    #[test]
    fn earned_points_are_floored() {
        assert_eq!(earned_points(Decimal::new(1899, 2), Decimal::ONE), 18);
        assert_eq!(earned_points(Decimal::new(1000, 2), Decimal::new(5, 1)), 5);
        assert_eq!(earned_points(Decimal::ZERO, Decimal::ONE), 0);
    }
}
