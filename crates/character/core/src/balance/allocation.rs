//! Attribute allocations derived from class power weights.
//!
//! Both entry points work on allocation points only (what the player adds on
//! top of the class base) and always return an allocation that satisfies the
//! class budget and per-attribute cap.

use core::cmp::Reverse;

use crate::definition::{Attribute, AttributeSet, ClassDefinition};
use crate::validate::AttributeAllocation;

/// How far [`optimize_allocation`] moves each attribute toward the
/// suggestion, in percent of the gap.
pub const OPTIMIZE_STEP_PERCENT: i64 = 30;

/// Lean applied on top of the weight-proportional split.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Playstyle {
    #[default]
    Balanced,
    /// +2 STR and DEX, −1 INT and WIS.
    Aggressive,
    /// +3 CON, −1 STR and DEX.
    Defensive,
}

impl Playstyle {
    fn adjustment(self, attribute: Attribute) -> i64 {
        match (self, attribute) {
            (Self::Aggressive, Attribute::Str | Attribute::Dex) => 2,
            (Self::Aggressive, Attribute::Int | Attribute::Wis) => -1,
            (Self::Defensive, Attribute::Con) => 3,
            (Self::Defensive, Attribute::Str | Attribute::Dex) => -1,
            _ => 0,
        }
    }
}

/// Spends the class attribute budget in proportion to its power weights.
///
/// Each attribute starts at `⌊points × weight / Σ weights⌋` plus the
/// playstyle adjustment, clamped to `[0, cap]`. Points still unspent go one
/// at a time to the heaviest attributes (ties in canonical order); any excess
/// comes off the lightest ones. The whole budget is spent unless the cap
/// makes that impossible.
pub fn suggest_allocation(class: &ClassDefinition, playstyle: Playstyle) -> AttributeAllocation {
    let budget = i64::from(class.attribute_points);
    let cap = attribute_cap(class);
    let weights = AttributeSet::splat(()).map(|attribute, _| i64::from(class.power_weight(attribute)));
    let total_weight: i64 = weights.iter().map(|(_, weight)| *weight).sum();

    let mut points = weights.map(|attribute, weight| {
        let share = if total_weight == 0 {
            budget / Attribute::COUNT as i64
        } else {
            budget * weight / total_weight
        };
        (share + playstyle.adjustment(attribute)).clamp(0, cap)
    });

    let mut heaviest_first = Attribute::ALL;
    heaviest_first.sort_by_key(|attribute| Reverse(*weights.get(*attribute)));
    let mut lightest_first = Attribute::ALL;
    lightest_first.sort_by_key(|attribute| *weights.get(*attribute));

    let mut left = budget - total(&points);
    while left > 0 {
        let before = left;
        for &attribute in &heaviest_first {
            let slot = points.get_mut(attribute);
            if left > 0 && *slot < cap {
                *slot += 1;
                left -= 1;
            }
        }
        if left == before {
            break;
        }
    }
    while left < 0 {
        for &attribute in &lightest_first {
            let slot = points.get_mut(attribute);
            if left < 0 && *slot > 0 {
                *slot -= 1;
                left += 1;
            }
        }
    }

    to_allocation(&points)
}

/// Moves a fully spent allocation part of the way toward the balanced
/// suggestion, then restores the exact budget. Points freed or owed by the
/// step go first to the attributes furthest from the suggestion, then to any
/// attribute with room, in canonical order.
///
/// Allocations that leave points unspent are returned unchanged.
pub fn optimize_allocation(
    class: &ClassDefinition,
    current: &AttributeAllocation,
) -> AttributeAllocation {
    let budget = i64::from(class.attribute_points);
    if current.total() != u64::from(class.attribute_points) {
        return *current;
    }

    let cap = attribute_cap(class);
    let suggested = suggest_allocation(class, Playstyle::Balanced);
    let mut points = current.as_set().map(|attribute, points| {
        let now = i64::from(*points);
        let gap = i64::from(suggested.points(attribute)) - now;
        (now + gap * OPTIMIZE_STEP_PERCENT / 100).clamp(0, cap)
    });

    let target = |attribute: Attribute| i64::from(suggested.points(attribute));
    let mut left = budget - total(&points);

    let mut furthest_first = Attribute::ALL;
    if left > 0 {
        furthest_first.sort_by_key(|a| Reverse(target(*a) - *points.get(*a)));
    } else {
        furthest_first.sort_by_key(|a| target(*a) - *points.get(*a));
    }
    for attribute in furthest_first {
        left = shift(points.get_mut(attribute), left, target(attribute).clamp(0, cap));
    }
    for attribute in Attribute::ALL {
        let bound = if left > 0 { cap } else { 0 };
        left = shift(points.get_mut(attribute), left, bound);
    }

    to_allocation(&points)
}

/// Moves `slot` toward `bound` by at most `|left|`, in the direction of
/// `left`. Returns the points still to move.
fn shift(slot: &mut i64, left: i64, bound: i64) -> i64 {
    let step = if left > 0 {
        (bound - *slot).clamp(0, left)
    } else {
        (bound - *slot).clamp(left, 0)
    };
    *slot += step;
    left - step
}

/// Per-attribute ceiling; without an explicit cap the whole budget may go to
/// one attribute.
fn attribute_cap(class: &ClassDefinition) -> i64 {
    i64::from(class.attribute_cap.unwrap_or(class.attribute_points))
}

fn total(points: &AttributeSet<i64>) -> i64 {
    points.iter().map(|(_, p)| *p).sum()
}

fn to_allocation(points: &AttributeSet<i64>) -> AttributeAllocation {
    // Every value was clamped to [0, cap] and cap came from a u32.
    AttributeAllocation::from_points(points.map(|_, p| u32::try_from(*p).unwrap_or(0)))
}
