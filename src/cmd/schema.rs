//! Schema command - print expected input formats

use crate::portfolio::Portfolio;
use crate::tax::brackets::BracketInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which input format to describe
    #[arg(value_enum, default_value = "portfolio")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the portfolio snapshot
    Portfolio,
    /// JSON Schema for a bracket table file
    Brackets,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.format {
            SchemaFormat::Portfolio => schema_for!(Portfolio),
            SchemaFormat::Brackets => schema_for!(BracketInput),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
