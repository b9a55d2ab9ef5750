//! `docnav check` command implementation.

use clap::Args;
use docnav_config::{NavbarEntry, SiteConfig};

use super::DeclarationArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    declaration: DeclarationArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration cannot be loaded or is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.declaration.load()?;

        output.highlight(&format!(
            "{} ({})",
            config.metadata().title(),
            config.metadata().base()
        ));
        for line in summary(&config) {
            output.info(&line);
        }
        output.success("Declaration is valid");
        Ok(())
    }
}

/// Summary lines describing a loaded configuration.
fn summary(config: &SiteConfig) -> Vec<String> {
    let links: usize = config
        .navbar()
        .iter()
        .map(|entry| match entry {
            NavbarEntry::Link(_) => 1,
            NavbarEntry::Dropdown { children, .. } => children.len(),
        })
        .sum();
    let flags = config.theme().flags();

    let mut lines = vec![
        format!(
            "Navbar: {} entries, {links} links",
            config.navbar().len()
        ),
        format!("Sidebar: {} prefixes", config.sidebar().len()),
    ];
    lines.extend(config.sidebar().prefixes().map(|prefix| {
        let groups = config.sidebar().get(prefix).unwrap_or_default();
        let pages: usize = groups.iter().map(|group| group.children().len()).sum();
        format!("  {prefix}: {} groups, {pages} pages", groups.len())
    }));
    lines.push(format!(
        "Theme: editLink={} contributors={} lastUpdated={}",
        flags.edit_link, flags.contributors, flags.last_updated
    ));
    lines.push(format!("Bundler: {}", config.bundler().kind()));
    lines
}
