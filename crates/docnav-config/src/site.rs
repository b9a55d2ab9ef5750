//! Site configuration aggregate.
//!
//! [`SiteConfig`] owns everything a renderer needs: metadata, navbar,
//! sidebar, theme flags and the bundler selection. It is built once by
//! [`load_site_config`](crate::load_site_config) and only read afterwards;
//! share it by reference (or behind an `Arc`) between consumers.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::error::{DeclarationError, DeclarationErrorKind};
use crate::link::LinkTarget;
use crate::navbar::NavbarEntry;
use crate::sidebar::SidebarSection;

/// Extra tag rendered into every page's `<head>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeadTag {
    tag: String,
    attributes: IndexMap<String, String>,
}

impl HeadTag {
    /// Create a head tag.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationErrorKind::EmptyLabel`] if `tag` is blank.
    pub fn new(tag: &str, attributes: IndexMap<String, String>) -> Result<Self, DeclarationError> {
        if tag.trim().is_empty() {
            return Err(DeclarationError::new(
                DeclarationErrorKind::EmptyLabel,
                "head tag name cannot be blank",
            ));
        }
        Ok(Self {
            tag: tag.to_owned(),
            attributes,
        })
    }

    /// Tag name (`meta`, `link`, ...).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }
}

/// Site-wide metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    base: String,
    lang: String,
    title: String,
    description: String,
    head: Vec<HeadTag>,
}

impl SiteMetadata {
    /// Create site metadata.
    ///
    /// # Errors
    ///
    /// - [`DeclarationErrorKind::MalformedDeclaration`] if `base` does not
    ///   start and end with `/`
    /// - [`DeclarationErrorKind::EmptyLabel`] if `lang` or `title` is blank
    pub fn new(
        base: String,
        lang: String,
        title: String,
        description: String,
        head: Vec<HeadTag>,
    ) -> Result<Self, DeclarationError> {
        if !base.starts_with('/') || !base.ends_with('/') {
            return Err(DeclarationError::malformed(format!(
                "base {base:?} must start and end with '/'"
            ))
            .within("base"));
        }
        require_non_blank(&lang, "lang")?;
        require_non_blank(&title, "title")?;

        Ok(Self {
            base,
            lang,
            title,
            description,
            head,
        })
    }

    /// Base path the site is served under (`/vedicskill-site/`).
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Language tag.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Extra head tags in declaration order.
    #[must_use]
    pub fn head(&self) -> &[HeadTag] {
        &self.head
    }

    /// Favicon URL from the first `<link rel="icon">` head tag.
    #[must_use]
    pub fn favicon(&self) -> Option<&str> {
        self.head
            .iter()
            .find(|tag| tag.tag == "link" && tag.attribute("rel") == Some("icon"))
            .and_then(|tag| tag.attribute("href"))
    }
}

fn require_non_blank(value: &str, field: &str) -> Result<(), DeclarationError> {
    if value.trim().is_empty() {
        return Err(DeclarationError::new(
            DeclarationErrorKind::EmptyLabel,
            format!("{field} cannot be blank"),
        )
        .within(field));
    }
    Ok(())
}

/// Per-page feature toggles.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFlags {
    /// Show "edit this page" links.
    pub edit_link: bool,
    /// Show contributor lists.
    pub contributors: bool,
    /// Show last-updated timestamps.
    pub last_updated: bool,
}

/// Theme settings other than navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    #[serde(flatten)]
    flags: ThemeFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<LinkTarget>,
}

impl ThemeConfig {
    /// Create theme settings.
    #[must_use]
    pub fn new(flags: ThemeFlags, logo: Option<LinkTarget>) -> Self {
        Self { flags, logo }
    }

    /// Feature toggles.
    #[must_use]
    pub fn flags(&self) -> ThemeFlags {
        self.flags
    }

    /// Logo image.
    #[must_use]
    pub fn logo(&self) -> Option<&LinkTarget> {
        self.logo.as_ref()
    }
}

/// Bundler selection token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BundlerKind {
    /// webpack.
    Webpack,
    /// Vite.
    Vite,
    /// Any other bundler, passed through by name.
    Custom(String),
}

impl BundlerKind {
    /// Bundler name as written in declarations.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Webpack => "webpack",
            Self::Vite => "vite",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for BundlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BundlerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Bundler selection and options.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bundler {
    #[serde(rename = "name")]
    kind: BundlerKind,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    options: BTreeMap<String, serde_json::Value>,
}

impl Bundler {
    /// Select a bundler by name. Names are matched case-insensitively;
    /// unknown names become [`BundlerKind::Custom`].
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationErrorKind::EmptyLabel`] if `name` is blank.
    pub fn new(
        name: &str,
        options: BTreeMap<String, serde_json::Value>,
    ) -> Result<Self, DeclarationError> {
        let trimmed = name.trim();
        let kind = match trimmed.to_ascii_lowercase().as_str() {
            "" => {
                return Err(DeclarationError::new(
                    DeclarationErrorKind::EmptyLabel,
                    "bundler name cannot be blank",
                )
                .within("name"));
            }
            "webpack" => BundlerKind::Webpack,
            "vite" => BundlerKind::Vite,
            _ => BundlerKind::Custom(trimmed.to_owned()),
        };
        Ok(Self { kind, options })
    }

    /// Selected bundler.
    #[must_use]
    pub fn kind(&self) -> &BundlerKind {
        &self.kind
    }

    /// Bundler options (empty keeps the bundler's defaults).
    #[must_use]
    pub fn options(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.options
    }
}

/// Immutable site configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteConfig {
    #[serde(flatten)]
    metadata: SiteMetadata,
    navbar: Vec<NavbarEntry>,
    sidebar: SidebarSection,
    theme: ThemeConfig,
    bundler: Bundler,
}

impl SiteConfig {
    /// Assemble a configuration from validated parts.
    #[must_use]
    pub fn new(
        metadata: SiteMetadata,
        navbar: Vec<NavbarEntry>,
        sidebar: SidebarSection,
        theme: ThemeConfig,
        bundler: Bundler,
    ) -> Self {
        Self {
            metadata,
            navbar,
            sidebar,
            theme,
            bundler,
        }
    }

    /// Site metadata.
    #[must_use]
    pub fn metadata(&self) -> &SiteMetadata {
        &self.metadata
    }

    /// Navbar entries in render order.
    #[must_use]
    pub fn navbar(&self) -> &[NavbarEntry] {
        &self.navbar
    }

    /// Sidebar sections.
    #[must_use]
    pub fn sidebar(&self) -> &SidebarSection {
        &self.sidebar
    }

    /// Theme settings.
    #[must_use]
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Bundler selection.
    #[must_use]
    pub fn bundler(&self) -> &Bundler {
        &self.bundler
    }
}
