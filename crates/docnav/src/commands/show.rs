//! `docnav show` command implementation.

use clap::Args;

use super::DeclarationArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    declaration: DeclarationArgs,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl ShowArgs {
    /// Execute the show command: print the normalized configuration as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration cannot be loaded, serialized or written to stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.declaration.load()?;
        let json = if self.compact {
            serde_json::to_string(&config)?
        } else {
            serde_json::to_string_pretty(&config)?
        };
        Output::new().data(&json)?;
        Ok(())
    }
}
