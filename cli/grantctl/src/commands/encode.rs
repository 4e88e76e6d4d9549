//! Encode command.
//!
//! Reads a grant configuration file (offline) and prints the identifier the
//! resource would be created with.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use snowgrant_state::{GrantConfig, GrantState};

use crate::error::CliError;
use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Encode a grant configuration file.
#[derive(Debug, Args)]
pub struct EncodeCommand {
    /// Grant configuration file (TOML or JSON).
    #[arg(long, value_name = "PATH")]
    file: PathBuf,
}

impl EncodeCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let config = read_config(&self.file)?;
        let state = GrantState::create(&config)
            .with_context(|| format!("Invalid grant config {}", self.file.display()))?;

        match ctx.format {
            OutputFormat::Json => {
                print_single(&state, &[], OutputFormat::Json);
            }
            OutputFormat::Table => {
                // Bare id so the output can be piped into an import.
                println!("{}", state.id);
            }
        }

        Ok(())
    }
}

fn read_config(path: &Path) -> Result<GrantConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grant config {}", path.display()))?;
    parse_config(path, &contents)
}

fn parse_config(path: &Path, contents: &str) -> Result<GrantConfig> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(contents)
            .with_context(|| format!("Failed to parse grant config {}", path.display())),
        Some("json") => serde_json::from_str(contents)
            .with_context(|| format!("Failed to parse grant config {}", path.display())),
        _ => Err(CliError::UnsupportedConfigFile(path.to_path_buf()).into()),
    }
}
