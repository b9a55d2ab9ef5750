//! `docnav lookup` command implementation.

use clap::Args;
use docnav_config::{SidebarGroup, SiteConfig};
use serde::Serialize;

use super::DeclarationArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lookup command.
#[derive(Args)]
pub(crate) struct LookupArgs {
    /// Page path to find the sidebar for (e.g. /mongodb/mongodb.html).
    page: String,

    #[command(flatten)]
    declaration: DeclarationArgs,
}

/// Sidebar resolved for a page.
#[derive(Debug, Serialize)]
struct LookupResult<'a> {
    page: &'a str,
    prefix: Option<&'a str>,
    groups: &'a [SidebarGroup],
}

impl LookupArgs {
    /// Execute the lookup command: print the page's sidebar groups as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration cannot be loaded, serialized or written to stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.declaration.load()?;

        let result = lookup(&config, &self.page);
        if result.prefix.is_none() {
            output.info(&format!("No sidebar prefix matches {}", self.page));
        }
        output.data(&serde_json::to_string_pretty(&result)?)?;
        Ok(())
    }
}

fn lookup<'a>(config: &'a SiteConfig, page: &'a str) -> LookupResult<'a> {
    let sidebar = config.sidebar();
    LookupResult {
        page,
        prefix: sidebar.matching_prefix(page),
        groups: sidebar.lookup(page),
    }
}
