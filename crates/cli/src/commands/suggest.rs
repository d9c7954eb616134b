//! Suggest an attribute allocation for a class.

use anyhow::Result;
use clap::Parser;
use console::style;

use character_core::Playstyle;

use crate::context::{Context, describe};

/// Suggest an attribute allocation for a class
#[derive(Parser)]
pub struct Suggest {
    /// Class id, e.g. Warrior
    #[arg(value_name = "CLASS")]
    class: String,

    /// balanced, aggressive or defensive
    #[arg(short, long, default_value_t = Playstyle::Balanced)]
    playstyle: Playstyle,
}

impl Suggest {
    pub fn execute(self, context: &Context) -> Result<()> {
        let service = context.service()?;
        let allocation = service
            .suggest(&self.class, self.playstyle)
            .map_err(describe)?;

        println!(
            "{} {} ({})",
            style("=== Suggested Allocation:").bold().green(),
            self.class,
            self.playstyle
        );
        for (attribute, points) in allocation.as_set().iter() {
            println!("  {:<4} +{}", attribute, points);
        }
        println!("  Total: {}", allocation.total());
        Ok(())
    }
}
