//! Validate command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use snowgrant_id::CompositeGrantIdentifier;
use tabled::Tabled;
use tracing::debug;

use crate::error::CliError;
use crate::output::{print_output, print_success, OutputFormat};

use super::CommandContext;

/// Check that identifiers decode.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Identifiers to check.
    #[arg(required = true)]
    ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
struct ValidationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "VALID")]
    valid: bool,
    #[tabled(rename = "ERROR")]
    error: String,
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let rows = check_all(&self.ids);
        let total = rows.len();
        let failed = rows.iter().filter(|row| !row.valid).count();

        match ctx.format {
            OutputFormat::Table if failed == 0 => {
                print_success(&format!("{total} identifier(s) valid"));
            }
            format => print_output(&rows, format),
        }

        if failed > 0 {
            return Err(CliError::ValidationFailed { failed, total }.into());
        }
        Ok(())
    }
}

fn check_all(ids: &[String]) -> Vec<ValidationRow> {
    ids.iter()
        .map(|id| {
            let result = CompositeGrantIdentifier::decode(id);
            debug!(id = %id, valid = result.is_ok(), "checked identifier");
            ValidationRow {
                id: id.clone(),
                valid: result.is_ok(),
                error: result.err().map(|e| e.to_string()).unwrap_or_default(),
            }
        })
        .collect()
}
