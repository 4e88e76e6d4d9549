//! Upgrade command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use snowgrant_state::upgrade_legacy_id;

use crate::output::{print_single, print_success, FieldRow, OutputFormat};

use super::CommandContext;

/// Rewrite a legacy identifier into its canonical form.
#[derive(Debug, Args)]
pub struct UpgradeCommand {
    /// Identifier to upgrade, e.g. `db.role|false|USAGE|OnDatabase|sales`.
    id: String,
}

#[derive(Debug, Serialize)]
struct UpgradeResult<'a> {
    id: &'a str,
    upgraded: &'a str,
    changed: bool,
}

impl UpgradeCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let upgraded = upgrade_legacy_id(&self.id)
            .with_context(|| format!("Failed to upgrade '{}'", self.id))?;
        let result = UpgradeResult {
            id: &self.id,
            upgraded: &upgraded,
            changed: upgraded != self.id,
        };

        match ctx.format {
            OutputFormat::Json => {
                print_single(&result, &[], OutputFormat::Json);
            }
            OutputFormat::Table if !result.changed => {
                print_success("Identifier is already canonical");
            }
            OutputFormat::Table => {
                let rows = [
                    FieldRow::new("id", result.id),
                    FieldRow::new("upgraded", result.upgraded),
                ];
                print_single(&result, &rows, OutputFormat::Table);
            }
        }

        Ok(())
    }
}
