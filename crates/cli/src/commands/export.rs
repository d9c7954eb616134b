//! Export a build request as engine JSON.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use console::style;

use character_core::SchemaVersion;

use crate::context::{Context, describe};

/// Export a build request as engine JSON
#[derive(Parser)]
pub struct Export {
    /// Build request file (.ron or .json)
    #[arg(value_name = "BUILD")]
    build: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Schema version, overriding the configured one (1.0 or 1.1)
    #[arg(long, value_name = "VERSION", value_parser = parse_schema)]
    schema: Option<SchemaVersion>,

    /// Leave the appearance map out of the document
    #[arg(long)]
    no_appearance: bool,

    /// Pretty-print the JSON
    #[arg(short, long)]
    pretty: bool,

    /// Print the SHA-256 fingerprint of the compact document to stderr
    #[arg(long)]
    fingerprint: bool,
}

fn parse_schema(value: &str) -> Result<SchemaVersion, String> {
    SchemaVersion::parse(value).map_err(|e| e.to_string())
}

impl Export {
    pub fn execute(self, context: &Context) -> Result<()> {
        let service = context.service()?;
        let request = context.load_build(&self.build)?;

        let mut options = service.registry().current().config().export_options();
        if let Some(version) = self.schema {
            options.schema_version = version;
        }
        if self.no_appearance {
            options.include_appearance = false;
        }

        let document = service.export_with(&request, &options).map_err(describe)?;
        let json = if self.pretty {
            document.to_json_pretty()?
        } else {
            document.to_json()?
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{json}\n"))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!(
                    "{} {}",
                    style("✓ Exported to").bold().green(),
                    path.display()
                );
            }
            None => println!("{json}"),
        }

        if self.fingerprint {
            eprintln!(
                "{} {}",
                style("Fingerprint:").bold().cyan(),
                document.fingerprint()?
            );
        }
        Ok(())
    }
}
