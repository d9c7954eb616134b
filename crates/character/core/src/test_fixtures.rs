//! Shared definitions for unit tests.

use crate::catalog::Catalog;
use crate::definition::{
    Attribute, AttributeSet, ClassDefinition, Modifier, SkillNodeDefinition, SkillTreeDefinition,
};

/// Warrior: 10 attribute points, 5 skill points, `combat` tree.
pub(crate) fn warrior() -> ClassDefinition {
    ClassDefinition::new(
        "Warrior",
        "Warrior",
        AttributeSet::new(16, 12, 8, 10, 14, 10),
        10,
        5,
    )
    .with_skill_tree("combat")
    .with_base_stat("HP", 100)
}

/// ```text
/// tier 1: PowerStrike (2)        Toughness (1)
/// tier 2: WhirlwindAttack (2)    IronSkin (1)
/// tier 3: Earthshaker (3)        Berserk (1, any of IronSkin / WhirlwindAttack)
/// ```
pub(crate) fn combat_tree() -> SkillTreeDefinition {
    SkillTreeDefinition::new("combat", "Combat")
        .with_node(
            SkillNodeDefinition::new("PowerStrike", 1, 2).with_modifier(Modifier::add(Attribute::Str, 5)),
        )
        .with_node(SkillNodeDefinition::new("Toughness", 1, 1).with_modifier(Modifier::add("HP", 20)))
        .with_node(
            SkillNodeDefinition::new("WhirlwindAttack", 2, 2)
                .requires("PowerStrike")
                .with_modifier(Modifier::multiply(Attribute::Str, 10))
                .with_modifier(Modifier::add(Attribute::Dex, 2)),
        )
        .with_node(
            SkillNodeDefinition::new("IronSkin", 2, 1)
                .requires("Toughness")
                .with_modifier(Modifier::multiply("HP", 25)),
        )
        .with_node(
            SkillNodeDefinition::new("Earthshaker", 3, 3)
                .requires("WhirlwindAttack")
                .with_modifier(Modifier::multiply(Attribute::Str, 20)),
        )
        .with_node(
            SkillNodeDefinition::new("Berserk", 3, 1)
                .requires_any(["IronSkin", "WhirlwindAttack"])
                .with_modifier(Modifier::set(Attribute::Wis, 3)),
        )
}

pub(crate) fn catalog() -> Catalog {
    Catalog::build(&[warrior()], &[combat_tree()]).expect("fixture definitions are valid")
}
