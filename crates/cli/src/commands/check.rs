//! Load definitions and print the catalog structure.

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::context::Context;

/// Load the definitions and report catalog structure
#[derive(Parser)]
pub struct Check {
    /// Also list every skill with its cost and prerequisites
    #[arg(short, long)]
    verbose: bool,
}

impl Check {
    pub fn execute(self, context: &Context) -> Result<()> {
        let service = context.service()?;
        let snapshot = service.registry().current();
        let catalog = snapshot.catalog();
        let config = snapshot.config();

        println!(
            "{} {}",
            style("Data Dir:").bold().cyan(),
            context.data_dir().display()
        );
        println!(
            "{} strict_duplicates={}, include_appearance={}, schema={}",
            style("Config:").bold().cyan(),
            config.strict_duplicates,
            config.include_appearance,
            config.schema_version
        );
        println!();

        println!("{}", style("Classes:").bold().yellow());
        for class in catalog.classes() {
            println!(
                "  {} - {} attribute points, {} skill points (+{}/level), trees: {}",
                style(&class.id).bold(),
                class.attribute_points,
                class.skill_points,
                class.skill_points_per_level,
                class
                    .skill_trees
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        println!();

        println!("{}", style("Skill Trees:").bold().yellow());
        for tree in catalog.trees() {
            println!(
                "  {} ({}) - {} skills, {} tiers",
                style(tree.id()).bold(),
                tree.name(),
                tree.node_count(),
                tree.depth()
            );
            if !self.verbose {
                continue;
            }
            for (tier, nodes) in tree.tiers() {
                for &index in nodes {
                    let node = catalog.node(index);
                    let requires: Vec<&str> = catalog
                        .closure(index)
                        .iter()
                        .map(|i| catalog.node(*i).id().as_str())
                        .collect();
                    println!(
                        "    T{} {} (cost {}){}",
                        tier,
                        node.id(),
                        node.cost(),
                        if requires.is_empty() {
                            String::new()
                        } else {
                            format!(" requires {}", requires.join(", "))
                        }
                    );
                }
            }
        }
        println!();

        println!(
            "{} {} classes, {} skills",
            style("✓ Definitions valid:").bold().green(),
            catalog.class_count(),
            catalog.skill_count()
        );
        Ok(())
    }
}
