//! Validate a build request and report budget usage.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::context::{Context, describe};

/// Validate a build request and report budget usage
#[derive(Parser)]
pub struct Validate {
    /// Build request file (.ron or .json)
    #[arg(value_name = "BUILD")]
    build: PathBuf,

    /// Print resolved stats as well
    #[arg(short, long)]
    stats: bool,
}

impl Validate {
    pub fn execute(self, context: &Context) -> Result<()> {
        let service = context.service()?;
        let request = context.load_build(&self.build)?;

        let report = service.check(&request).map_err(describe)?;

        println!(
            "{} {} (level {}, catalog v{})",
            style("✓ Valid build:").bold().green(),
            report.class,
            report.level,
            report.catalog_version
        );
        println!(
            "  Skills: {}",
            report
                .skills
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("  Skill cost: {}", report.skill_cost);
        println!(
            "  Unspent: {} attribute points, {} skill points",
            report.unspent_attribute_points, report.unspent_skill_points
        );

        if self.stats {
            let resolved = service.resolve(&request).map_err(describe)?;
            println!();
            println!("{}", style("Stats:").bold().yellow());
            for (stat, value) in resolved.stats().iter() {
                if value.is_integer() {
                    println!("  {:<6} {}", stat.as_str(), value);
                } else {
                    println!(
                        "  {:<6} {} (exact {})",
                        stat.as_str(),
                        value.round_half_up(),
                        value
                    );
                }
            }
        }
        Ok(())
    }
}
