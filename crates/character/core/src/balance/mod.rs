//! Power-level scoring, head-to-head build comparison, and allocation
//! suggestions.
//!
//! Power is the weighted sum of resolved attributes, using each class's
//! `power_weights` (percent, default 100). Everything stays exact; callers
//! round for display.

mod allocation;

use core::cmp::Ordering;

use crate::definition::Attribute;
use crate::stats::{ResolvedBuild, StatValue};

pub use allocation::{OPTIMIZE_STEP_PERCENT, Playstyle, optimize_allocation, suggest_allocation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Winner {
    First,
    Second,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildComparison {
    pub first_power: StatValue,
    pub second_power: StatValue,
    /// `|first − second|`
    pub difference: StatValue,
    pub winner: Winner,
    /// `difference / max(first, second) × 100`, zero when the larger power
    /// is zero.
    pub advantage_percent: StatValue,
}

/// Σ attribute × weight / 100 over the six attributes.
pub fn power_level(build: &ResolvedBuild) -> StatValue {
    let class = build.class();
    Attribute::ALL
        .into_iter()
        .filter_map(|attribute| {
            let weight = i64::from(class.power_weight(attribute));
            build.stats().attribute(attribute).scale(weight, 100)
        })
        .sum()
}

/// Compares two builds by power level. Each build is scored with its own
/// class weights.
pub fn compare_builds(first: &ResolvedBuild, second: &ResolvedBuild) -> BuildComparison {
    let first_power = power_level(first);
    let second_power = power_level(second);
    let difference = (first_power - second_power).abs();

    let winner = match first_power.cmp(&second_power) {
        Ordering::Greater => Winner::First,
        Ordering::Less => Winner::Second,
        Ordering::Equal => Winner::Tie,
    };

    let advantage_percent = difference
        .scale(100, 1)
        .and_then(|scaled| scaled.checked_div(first_power.max(second_power)))
        .unwrap_or_default();

    BuildComparison {
        first_power,
        second_power,
        difference,
        winner,
        advantage_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::definition::AttributeSet;
    use crate::stats::resolve;
    use crate::test_fixtures::{catalog, combat_tree, warrior};
    use crate::validate::{BuildRequest, ValidationOptions, validate};

    fn resolved(catalog: &Catalog, request: BuildRequest) -> ResolvedBuild {
        let build = validate(catalog, &request, &ValidationOptions::default()).unwrap();
        resolve(&build)
    }

    fn striker() -> BuildRequest {
        BuildRequest::new("Warrior").allocate("STR", 10).select("PowerStrike")
    }

    fn tank() -> BuildRequest {
        BuildRequest::new("Warrior").allocate("CON", 10)
    }

    #[test]
    fn unweighted_power_is_attribute_sum() {
        let catalog = catalog();
        // 31 + 12 + 8 + 10 + 14 + 10
        assert_eq!(power_level(&resolved(&catalog, striker())), StatValue::from_int(85));
    }

    #[test]
    fn compares_with_class_weights() {
        let class = warrior().with_power_weights(AttributeSet::new(200, 120, 80, 100, 180, 100));
        let catalog = Catalog::build(&[class], &[combat_tree()]).unwrap();

        let comparison =
            compare_builds(&resolved(&catalog, striker()), &resolved(&catalog, tank()));

        // 62 + 14.4 + 6.4 + 10 + 25.2 + 10
        assert_eq!(comparison.first_power, StatValue::from_int(128));
        // 32 + 14.4 + 6.4 + 10 + 43.2 + 10
        assert_eq!(comparison.second_power, StatValue::from_int(116));
        assert_eq!(comparison.difference, StatValue::from_int(12));
        assert_eq!(comparison.winner, Winner::First);
        assert_eq!(comparison.advantage_percent, StatValue::ratio(75, 8).unwrap());
    }

    #[test]
    fn comparison_is_symmetric() {
        let catalog = catalog();
        let a = resolved(&catalog, striker());
        let b = resolved(&catalog, tank());

        let forward = compare_builds(&a, &b);
        let backward = compare_builds(&b, &a);
        assert_eq!(forward.winner, Winner::First);
        assert_eq!(backward.winner, Winner::Second);
        assert_eq!(forward.difference, backward.difference);
        assert_eq!(forward.advantage_percent, backward.advantage_percent);
    }

    #[test]
    fn identical_builds_tie() {
        let catalog = catalog();
        let a = resolved(&catalog, tank());
        let comparison = compare_builds(&a, &a.clone());
        assert_eq!(comparison.winner, Winner::Tie);
        assert_eq!(comparison.advantage_percent, StatValue::ZERO);
        assert_eq!(comparison.winner.to_string(), "tie");
    }
}
