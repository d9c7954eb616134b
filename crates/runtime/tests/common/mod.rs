#![allow(dead_code)]

use std::path::Path;

use character_core::{
    Attribute, AttributeSet, ClassDefinition, Modifier, SkillNodeDefinition, SkillTreeDefinition,
};

pub const CLASSES_RON: &str = r#"(
    classes: [
        (
            id: "Warrior",
            name: "Warrior",
            base_attributes: (STR: 16, DEX: 12, INT: 8, WIS: 10, CON: 14, CHA: 10),
            base_stats: { "HP": 100 },
            attribute_points: 10,
            skill_points: 5,
            skill_trees: ["combat"],
        ),
    ],
)"#;

pub const SKILLS_RON: &str = r#"(
    trees: [
        (
            id: "combat",
            name: "Combat",
            nodes: [
                (id: "PowerStrike", tier: 1, cost: 2,
                 modifiers: [(stat: "STR", op: add, magnitude: 5)]),
                (id: "Toughness", tier: 1, cost: 1,
                 modifiers: [(stat: "HP", op: add, magnitude: 20)]),
                (id: "WhirlwindAttack", tier: 2, cost: 2,
                 prerequisites: [Skill("PowerStrike")],
                 modifiers: [(stat: "STR", op: multiply, magnitude: 10)]),
            ],
        ),
    ],
)"#;

/// Writes a complete data directory and returns its guard.
pub fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "classes.ron", CLASSES_RON);
    write(dir.path(), "skills.ron", SKILLS_RON);
    dir
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write fixture");
}

/// A second definition set with a Mage class, used for in-memory swaps.
pub fn arcane_definitions() -> (Vec<ClassDefinition>, Vec<SkillTreeDefinition>) {
    let mage = ClassDefinition::new("Mage", "Mage", AttributeSet::new(8, 10, 16, 14, 10, 12), 10, 5)
        .with_skill_tree("arcane");
    let arcane = SkillTreeDefinition::new("arcane", "Arcane").with_node(
        SkillNodeDefinition::new("Fireball", 1, 2).with_modifier(Modifier::add(Attribute::Int, 3)),
    );
    (vec![mage], vec![arcane])
}
