//! Compare the power level of two builds.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use character_core::{StatValue, Winner};

use crate::context::{Context, describe};

/// Compare the power level of two builds
#[derive(Parser)]
pub struct Compare {
    /// First build request file
    #[arg(value_name = "FIRST")]
    first: PathBuf,

    /// Second build request file
    #[arg(value_name = "SECOND")]
    second: PathBuf,
}

impl Compare {
    pub fn execute(self, context: &Context) -> Result<()> {
        let service = context.service()?;
        let first = context.load_build(&self.first)?;
        let second = context.load_build(&self.second)?;

        let comparison = service.compare(&first, &second).map_err(describe)?;

        println!("{}", style("=== Build Comparison ===").bold().green());
        println!(
            "  {:<10} {} ({})",
            "First:",
            two_places(comparison.first_power),
            self.first.display()
        );
        println!(
            "  {:<10} {} ({})",
            "Second:",
            two_places(comparison.second_power),
            self.second.display()
        );
        println!("  {:<10} {}", "Difference:", two_places(comparison.difference));

        let verdict = match comparison.winner {
            Winner::First => format!("first build by {}%", two_places(comparison.advantage_percent)),
            Winner::Second => {
                format!("second build by {}%", two_places(comparison.advantage_percent))
            }
            Winner::Tie => "tie".to_owned(),
        };
        println!("  {:<10} {}", "Winner:", style(verdict).bold());
        Ok(())
    }
}

fn two_places(value: StatValue) -> String {
    format!("{:.2}", value.to_f64())
}
