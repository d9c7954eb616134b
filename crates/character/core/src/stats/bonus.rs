//! Bonus application following a fixed stack order.
//!
//! Every stat is resolved with the same order:
//! `Add → Multiply → Set`
//!
//! - **Add**: all flat amounts are summed and added to the base
//! - **Multiply**: all percentages are summed into one multiplier
//!   (`+10%` and `+20%` give `×1.3`, not `×1.1 × 1.2`)
//! - **Set**: the set with the highest tier wins; ties go to the lowest
//!   source skill id. The winning set overrides everything before it.

use crate::definition::{Modifier, ModifierOp, SkillId};

use super::value::StatValue;

/// A single bonus contributed by a skill modifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bonus {
    /// Flat additive amount.
    Add(i32),

    /// Percentage increase, stored as an integer (`20` = +20%).
    Multiply(i32),

    /// Absolute value. `tier` and `source` decide between competing sets.
    Set {
        value: i32,
        tier: u32,
        source: SkillId,
    },
}

impl Bonus {
    /// Converts a modifier of the skill `source` at `tier` into a bonus.
    pub fn from_modifier(modifier: &Modifier, tier: u32, source: &SkillId) -> Self {
        match modifier.op {
            ModifierOp::Add => Bonus::Add(modifier.magnitude),
            ModifierOp::Multiply => Bonus::Multiply(modifier.magnitude),
            ModifierOp::Set => Bonus::Set {
                value: modifier.magnitude,
                tier,
                source: source.clone(),
            },
        }
    }
}

/// The bonuses targeting one stat.
///
/// The order bonuses are added in never affects the result.
///
/// # Example
/// ```
/// # use character_core::stats::{Bonus, BonusStack, StatValue};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::Add(5));         // +5
/// stack.add(Bonus::Multiply(10));   // +10%
/// stack.add(Bonus::Multiply(20));   // +20% (summed)
///
/// // (10 + 5) × 1.3 = 19.5
/// let result = stack.apply(StatValue::from_int(10));
/// assert_eq!(result, StatValue::ratio(39, 2).unwrap());
/// assert_eq!(result.round_half_up(), 20);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Applies the stack to `base`.
    ///
    /// # Formula
    /// ```text
    /// result = set_winner ?? (base + Σadd) × (1 + Σpercent / 100)
    /// ```
    pub fn apply(&self, base: StatValue) -> StatValue {
        let flat: i64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Add(v) => Some(i64::from(*v)),
                _ => None,
            })
            .sum();

        let percent: i64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Multiply(p) => Some(i64::from(*p)),
                _ => None,
            })
            .sum();

        let winning_set = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Set {
                    value,
                    tier,
                    source,
                } => Some((*tier, source, *value)),
                _ => None,
            })
            // Highest tier first, then lowest source id.
            .min_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        if let Some((_, _, value)) = winning_set {
            return StatValue::from(value);
        }

        let after_add = base.plus(flat);
        if percent == 0 {
            after_add
        } else {
            after_add.scale_percent(percent)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}
