use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "patron-manager")]
#[command(about = "Console record manager for library patrons")]
pub struct CliConfig {
    #[arg(long, help = "Import this file at startup instead of prompting for one")]
    pub import: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.import {
            validate_path("import", path)?;
        }
        Ok(())
    }
}
