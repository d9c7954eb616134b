//! Nudge a build's attribute allocation toward its class suggestion.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use character_core::{StatValue, power_level};

use crate::context::{Context, describe};

/// Nudge a build's attribute allocation toward its class suggestion
#[derive(Parser)]
pub struct Optimize {
    /// Build request file (.ron or .json)
    #[arg(value_name = "BUILD")]
    build: PathBuf,
}

impl Optimize {
    pub fn execute(self, context: &Context) -> Result<()> {
        let service = context.service()?;
        let request = context.load_build(&self.build)?;

        let before = service.resolve(&request).map_err(describe)?;
        let optimized = service.optimize(&request).map_err(describe)?;
        let after = service
            .resolve(&request.clone().with_allocation(&optimized))
            .map_err(describe)?;

        println!(
            "{} {}",
            style("=== Optimized Allocation:").bold().green(),
            self.build.display()
        );
        for (attribute, points) in optimized.as_set().iter() {
            let current = before.allocation().points(attribute);
            let marker = if current == *points {
                style("=").dim()
            } else {
                style("→").yellow()
            };
            println!("  {:<4} {:>3} {} {}", attribute, current, marker, points);
        }
        println!(
            "  Power: {} {} {}",
            two_places(power_level(&before)),
            style("→").yellow(),
            two_places(power_level(&after))
        );
        Ok(())
    }
}

fn two_places(value: StatValue) -> String {
    format!("{:.2}", value.to_f64())
}
