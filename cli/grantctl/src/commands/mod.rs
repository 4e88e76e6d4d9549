//! CLI commands.

mod decode;
mod encode;
mod upgrade;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// grantctl - Inspect and build composite grant identifiers offline.
#[derive(Debug, Parser)]
#[command(name = "grantctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json). Defaults to the configured format.
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decode an identifier and show its parts.
    Decode(decode::DecodeCommand),

    /// Encode a grant configuration file into its identifier.
    Encode(encode::EncodeCommand),

    /// Check that identifiers decode.
    Validate(validate::ValidateCommand),

    /// Rewrite a legacy identifier into its canonical form.
    Upgrade(upgrade::UpgradeCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            format: self.format.unwrap_or(config.default_format),
        };

        match self.command {
            Commands::Decode(cmd) => cmd.run(ctx),
            Commands::Encode(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::Upgrade(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("grantctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_flag_overrides_config() {
        let cli = Cli::try_parse_from(["grantctl", "--format", "json", "version"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));

        let cli = Cli::try_parse_from(["grantctl", "version"]).unwrap();
        assert_eq!(cli.format, None);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["grantctl", "--format", "yaml", "version"]).is_err());
    }

    #[test]
    fn test_validate_takes_many_ids() {
        let cli = Cli::try_parse_from(["grantctl", "validate", "a", "b"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate(_)));
    }
}
