//! Site navigation descriptor loading for docnav.
//!
//! Reads a declarative site file (metadata, navbar, sidebar, theme flags,
//! bundler), validates it and produces an immutable [`SiteConfig`].
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_config::SiteConfig;
//!
//! // Searches for docnav.toml in the current directory and its parents
//! let config = SiteConfig::load(None, None)?;
//!
//! for group in config.sidebar().lookup("/mongodb/mongodb.html") {
//!     println!("{}", group.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Formats
//!
//! TOML is the default. Files ending in `.yaml`/`.yml` are read as YAML and
//! `.json` as JSON. Discovery looks for, in order, `docnav.toml`,
//! `docnav.yaml`, `docnav.yml` and `docnav.json`.
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `base`
//! - `title`
//! - `description`

mod declaration;
mod error;
mod expand;
mod link;
mod navbar;
mod sidebar;
mod site;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use declaration::{
    Format, RawBundler, RawDeclaration, RawNavbarEntry, RawSidebar, RawSidebarGroup, RawTheme,
    load_site_config,
};
pub use error::{DeclarationError, DeclarationErrorKind, LoadError};
pub use link::LinkTarget;
pub use navbar::{NavLink, NavbarEntry, build_navbar};
pub use sidebar::{SidebarGroup, SidebarSection, build_sidebar};
pub use site::{Bundler, BundlerKind, HeadTag, SiteConfig, SiteMetadata, ThemeConfig, ThemeFlags};

/// Declaration filenames searched for during discovery, in priority order.
pub const CONFIG_FILENAMES: [&str; 4] =
    ["docnav.toml", "docnav.yaml", "docnav.yml", "docnav.json"];

/// Settings that override declaration values.
///
/// All fields are optional. Only non-None values override the declaration.
#[derive(Debug, Default)]
pub struct LoadOptions {
    /// Override the base path (e.g. for preview deployments).
    pub base: Option<String>,
}

impl SiteConfig {
    /// Load and validate a site declaration.
    ///
    /// If `path` is provided, loads from that file. Otherwise, searches for
    /// a declaration in the current directory and its parents.
    ///
    /// Overrides from `options` are applied after environment expansion and
    /// before validation, so an overridden base path is still checked.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if no declaration exists, or the first
    /// parse, expansion or validation error.
    pub fn load(path: Option<&Path>, options: Option<&LoadOptions>) -> Result<Self, LoadError> {
        let path = match path {
            Some(path) if !path.exists() => return Err(LoadError::NotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => discover_config()
                .ok_or_else(|| LoadError::NotFound(PathBuf::from(CONFIG_FILENAMES[0])))?,
        };
        Self::load_from_file(&path, options)
    }

    /// Load a declaration from a specific file.
    fn load_from_file(path: &Path, options: Option<&LoadOptions>) -> Result<Self, LoadError> {
        let format = Format::from_path(path);
        debug!(path = %path.display(), %format, "Loading site declaration");

        let content = std::fs::read_to_string(path)?;
        let mut raw = RawDeclaration::parse(&content, format)?;

        expand_env_vars(&mut raw)?;
        if let Some(options) = options {
            apply_options(&mut raw, options);
        }

        let config = load_site_config(&raw)?;
        info!(
            path = %path.display(),
            base = config.metadata().base(),
            "Loaded site config"
        );
        Ok(config)
    }
}

/// Expand environment variable references in declaration strings.
fn expand_env_vars(raw: &mut RawDeclaration) -> Result<(), LoadError> {
    raw.base = expand::expand_env(&raw.base, "base")?;
    raw.title = expand::expand_env(&raw.title, "title")?;
    raw.description = expand::expand_env(&raw.description, "description")?;
    Ok(())
}

fn apply_options(raw: &mut RawDeclaration, options: &LoadOptions) {
    if let Some(base) = &options.base {
        raw.base.clone_from(base);
    }
}

/// Search for a declaration in the current directory and parents.
fn discover_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    discover_from(&cwd)
}

/// Search for a declaration in `start` and its parents.
fn discover_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILENAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}
