//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod lookup;
pub(crate) mod show;

use std::path::PathBuf;

use clap::Args;
use docnav_config::{LoadOptions, SiteConfig};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use lookup::LookupArgs;
pub(crate) use show::ShowArgs;

/// Declaration location and overrides shared by all commands.
#[derive(Args, Debug)]
pub(crate) struct DeclarationArgs {
    /// Path to the site declaration (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base path the site is served under (overrides the declaration).
    #[arg(long, env = "DOCNAV_BASE")]
    base: Option<String>,
}

impl DeclarationArgs {
    /// Load the site configuration these arguments point at.
    pub(crate) fn load(self) -> Result<SiteConfig, CliError> {
        let options = LoadOptions { base: self.base };
        Ok(SiteConfig::load(self.config.as_deref(), Some(&options))?)
    }
}
