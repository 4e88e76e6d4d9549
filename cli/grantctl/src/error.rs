//! Error handling and display for the CLI.

use std::path::PathBuf;

use colored::Colorize;
use snowgrant_id::{IdError, TargetKind};
use snowgrant_state::StateError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown output format '{0}' (expected table or json)")]
    InvalidFormat(String),

    #[error("Unsupported config file: {}", .0.display())]
    UnsupportedConfigFile(PathBuf),

    #[error("{failed} of {total} identifier(s) failed validation")]
    ValidationFailed { failed: usize, total: usize },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hint_for(err: &anyhow::Error) -> Option<String> {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return match cli_err {
            CliError::InvalidFormat(_) => {
                Some("Pass `--format table` or `--format json`.".to_string())
            }
            CliError::UnsupportedConfigFile(_) => {
                Some("Grant configs are read from `.toml` or `.json` files.".to_string())
            }
            CliError::ValidationFailed { .. } => None,
        };
    }

    let id_err = match err.downcast_ref::<StateError>() {
        Some(StateError::Id(id_err)) => id_err,
        Some(_) => return None,
        None => err.downcast_ref::<IdError>()?,
    };
    id_hint(id_err)
}

fn id_hint(err: &IdError) -> Option<String> {
    match err {
        IdError::MalformedQuotedName { .. } => Some(
            "Quote every name part (\"db\".\"schema\"). Run `grantctl upgrade` for ids with unquoted names."
                .to_string(),
        ),
        IdError::InvalidTargetKind(_) => {
            let kinds: Vec<&str> = TargetKind::ALL.iter().map(|k| k.as_str()).collect();
            Some(format!("Known target kinds: {}.", kinds.join(", ")))
        }
        e if e.is_segment_count_error() => Some(
            "Ids look like principal|with_grant_option|privileges|target_kind|... Quote names containing `|`."
                .to_string(),
        ),
        _ => None,
    }
}
