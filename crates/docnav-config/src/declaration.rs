//! Raw declaration shapes and source formats.
//!
//! [`RawDeclaration`] mirrors the declarative site file field by field and is
//! filled by serde from TOML, YAML or JSON. Nothing here is validated beyond
//! the shape; [`load_site_config`] turns a raw declaration into a
//! [`SiteConfig`].
//!
//! ```toml
//! base = "/vedicskill-site/"
//! lang = "en-US"
//! title = "Vedicskill"
//! description = "Data-driven analytics and learning with Vedicskill"
//! head = [["link", { rel = "icon", href = "/images/favicon_io/favicon.ico" }]]
//!
//! [theme]
//! editLink = false
//! contributors = false
//! lastUpdated = false
//!
//! [[theme.navbar]]
//! text = "Home"
//! link = "/"
//!
//! [[theme.sidebar."/mongodb/"]]
//! text = "MongoDB Docs"
//! collapsible = true
//! children = ["/mongodb/README.md", "/mongodb/mongodb.md"]
//!
//! [bundler]
//! name = "webpack"
//! ```

use std::collections::BTreeMap;

use indexmap::IndexMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{DeclarationError, LoadError};
use crate::link::LinkTarget;
use crate::navbar::build_navbar;
use crate::sidebar::build_sidebar;
use crate::site::{Bundler, HeadTag, SiteConfig, SiteMetadata, ThemeConfig, ThemeFlags};

/// Source format of a declaration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// TOML (`docnav.toml`).
    #[default]
    Toml,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl Format {
    /// Pick the format from a file extension. Unknown extensions are TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        })
    }
}

/// Site declaration as written.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawDeclaration {
    /// Base path the site is served under.
    pub base: String,
    /// Language tag.
    pub lang: String,
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Extra `<head>` tags as `[tag, attributes]` pairs. Attributes keep
    /// their declared order.
    #[serde(default)]
    pub head: Vec<(String, IndexMap<String, String>)>,
    /// Theme settings: navigation and feature flags.
    pub theme: RawTheme,
    /// Bundler selection.
    pub bundler: RawBundler,
}

/// Theme section of the declaration.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawTheme {
    /// Optional logo image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Navbar entries in render order.
    pub navbar: Vec<RawNavbarEntry>,
    /// Sidebar groups keyed by URL prefix.
    pub sidebar: RawSidebar,
    /// Show "edit this page" links.
    pub edit_link: bool,
    /// Show contributor lists.
    pub contributors: bool,
    /// Show last-updated timestamps.
    pub last_updated: bool,
}

/// Navbar entry as written: a link, or a dropdown with `children`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawNavbarEntry {
    /// Display label.
    #[serde(alias = "label")]
    pub text: String,
    /// Link target for simple entries.
    #[serde(default, alias = "target", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Dropdown children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNavbarEntry>>,
}

impl RawNavbarEntry {
    /// Simple link entry.
    #[must_use]
    pub fn link(text: &str, link: &str) -> Self {
        Self {
            text: text.to_owned(),
            link: Some(link.to_owned()),
            children: None,
        }
    }

    /// Dropdown entry.
    #[must_use]
    pub fn dropdown(text: &str, children: Vec<RawNavbarEntry>) -> Self {
        Self {
            text: text.to_owned(),
            link: None,
            children: Some(children),
        }
    }
}

/// Sidebar group as written.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawSidebarGroup {
    /// Group title.
    #[serde(alias = "title")]
    pub text: String,
    /// Whether the group can be collapsed. Defaults to `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    /// Page links in render order.
    #[serde(default)]
    pub children: Vec<String>,
}

/// Sidebar mapping as written: `(prefix, groups)` pairs in declaration order.
///
/// Kept as a list rather than a map so that repeated keys reach the sidebar
/// builder instead of being merged by the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawSidebar(pub Vec<(String, Vec<RawSidebarGroup>)>);

impl<'de> Deserialize<'de> for RawSidebar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SidebarVisitor;

        impl<'de> Visitor<'de> for SidebarVisitor {
            type Value = RawSidebar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from URL prefix to a list of sidebar groups")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((prefix, groups)) = map.next_entry()? {
                    entries.push((prefix, groups));
                }
                Ok(RawSidebar(entries))
            }
        }

        deserializer.deserialize_map(SidebarVisitor)
    }
}

impl Serialize for RawSidebar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (prefix, groups) in &self.0 {
            map.serialize_entry(prefix, groups)?;
        }
        map.end()
    }
}

/// Bundler section of the declaration.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawBundler {
    /// Bundler name (`webpack`, `vite`, ...).
    pub name: String,
    /// Bundler options; empty keeps the bundler's defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl RawDeclaration {
    /// Parse declaration text.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] if the text is not valid for `format` or
    /// does not match the declaration shape.
    pub fn parse(source: &str, format: Format) -> Result<Self, LoadError> {
        let parse_error = |message: String| LoadError::Parse { format, message };
        match format {
            Format::Toml => toml::from_str(source).map_err(|e| parse_error(e.to_string())),
            Format::Yaml => serde_yaml::from_str(source).map_err(|e| parse_error(e.to_string())),
            Format::Json => serde_json::from_str(source).map_err(|e| parse_error(e.to_string())),
        }
    }
}

/// Validate a raw declaration and build the site configuration.
///
/// This is the single load operation: link classification, navbar and
/// sidebar building, metadata checks. The first failure is returned with
/// its location in the declaration.
///
/// # Errors
///
/// Returns a [`DeclarationError`] describing the first invalid value.
pub fn load_site_config(raw: &RawDeclaration) -> Result<SiteConfig, DeclarationError> {
    let head = raw
        .head
        .iter()
        .enumerate()
        .map(|(i, (tag, attributes))| {
            HeadTag::new(tag, attributes.clone()).map_err(|e| e.within(format!("head[{i}]")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let metadata = SiteMetadata::new(
        raw.base.clone(),
        raw.lang.clone(),
        raw.title.clone(),
        raw.description.clone(),
        head,
    )?;

    let navbar = build_navbar(&raw.theme.navbar).map_err(|e| e.within("theme"))?;
    let sidebar = build_sidebar(&raw.theme.sidebar.0).map_err(|e| e.within("theme"))?;
    let logo = raw
        .theme
        .logo
        .as_deref()
        .map(LinkTarget::parse)
        .transpose()
        .map_err(|e| e.within("theme.logo"))?;
    let theme = ThemeConfig::new(
        ThemeFlags {
            edit_link: raw.theme.edit_link,
            contributors: raw.theme.contributors,
            last_updated: raw.theme.last_updated,
        },
        logo,
    );

    let bundler = Bundler::new(&raw.bundler.name, raw.bundler.options.clone())
        .map_err(|e| e.within("bundler"))?;

    debug!(
        navbar = navbar.len(),
        sidebar = sidebar.len(),
        bundler = %bundler.kind(),
        "Validated site declaration"
    );

    Ok(SiteConfig::new(metadata, navbar, sidebar, theme, bundler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeclarationErrorKind;
    use crate::site::BundlerKind;

    const VEDICSKILL: &str = include_str!("../fixtures/vedicskill.toml");

    fn scenario() -> RawDeclaration {
        RawDeclaration {
            base: "/vedicskill-site/".to_owned(),
            lang: "en-US".to_owned(),
            title: "Vedicskill".to_owned(),
            description: "Data-driven analytics and learning with Vedicskill".to_owned(),
            head: Vec::new(),
            theme: RawTheme {
                logo: None,
                navbar: vec![
                    RawNavbarEntry::link("Home", "/"),
                    RawNavbarEntry::dropdown(
                        "Documentation",
                        vec![RawNavbarEntry::link(
                            "MongoDB Atlas Vector DB",
                            "/mongodb/mongodb.html",
                        )],
                    ),
                ],
                sidebar: RawSidebar(vec![(
                    "/mongodb/".to_owned(),
                    vec![RawSidebarGroup {
                        text: "MongoDB Docs".to_owned(),
                        collapsible: Some(true),
                        children: vec![
                            "/mongodb/README.md".to_owned(),
                            "/mongodb/mongodb.md".to_owned(),
                        ],
                    }],
                )]),
                edit_link: false,
                contributors: false,
                last_updated: false,
            },
            bundler: RawBundler {
                name: "webpack".to_owned(),
                options: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn test_scenario_loads_and_looks_up_mongodb_group() {
        let config = load_site_config(&scenario()).unwrap();

        assert_eq!(config.metadata().base(), "/vedicskill-site/");
        let groups = config.sidebar().lookup("/mongodb/mongodb.md");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title(), "MongoDB Docs");
        assert!(groups[0].collapsible());
        let children: Vec<_> = groups[0].children().iter().map(LinkTarget::as_str).collect();
        assert_eq!(children, vec!["/mongodb/README.md", "/mongodb/mongodb.md"]);
    }

    #[test]
    fn test_loading_twice_gives_equal_configs() {
        let raw = scenario();
        let first = load_site_config(&raw).unwrap();
        let second = load_site_config(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_navbar_error_path_is_prefixed_with_theme() {
        let mut raw = scenario();
        raw.theme.navbar[1] = RawNavbarEntry::dropdown(
            "Documentation",
            vec![RawNavbarEntry::link("MongoDB", "mongodb.html")],
        );

        let err = load_site_config(&raw).unwrap_err();
        assert_eq!(err.kind(), DeclarationErrorKind::InvalidLinkKind);
        assert_eq!(err.path(), "theme.navbar[1].children[0].link");
    }

    #[test]
    fn test_sidebar_error_path_is_prefixed_with_theme() {
        let mut raw = scenario();
        raw.theme.sidebar.0[0].1[0].children.clear();

        let err = load_site_config(&raw).unwrap_err();
        assert_eq!(err.kind(), DeclarationErrorKind::EmptyGroup);
        assert_eq!(err.path(), "theme.sidebar.\"/mongodb/\"[0].children");
    }

    #[test]
    fn test_invalid_logo_is_rejected() {
        let mut raw = scenario();
        raw.theme.logo = Some("logo.png".to_owned());

        let err = load_site_config(&raw).unwrap_err();
        assert_eq!(err.kind(), DeclarationErrorKind::InvalidLinkKind);
        assert_eq!(err.path(), "theme.logo");
    }

    #[test]
    fn test_blank_head_tag_is_rejected() {
        let mut raw = scenario();
        raw.head.push((" ".to_owned(), IndexMap::new()));

        let err = load_site_config(&raw).unwrap_err();
        assert_eq!(err.kind(), DeclarationErrorKind::EmptyLabel);
        assert_eq!(err.path(), "head[0]");
    }

    #[test]
    fn test_parse_fixture_toml() {
        let raw = RawDeclaration::parse(VEDICSKILL, Format::Toml).unwrap();
        let config = load_site_config(&raw).unwrap();

        assert_eq!(config.metadata().title(), "Vedicskill");
        assert_eq!(
            config.metadata().favicon(),
            Some("/images/favicon_io/favicon.ico")
        );
        let labels: Vec<_> = config.navbar().iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec!["Home", "Courses", "Documentation", "About Us"]
        );
        let prefixes: Vec<_> = config.sidebar().prefixes().collect();
        assert_eq!(prefixes, vec!["/", "/mongodb/", "/statistics/"]);
        assert_eq!(config.bundler().kind(), &BundlerKind::Webpack);
        assert!(!config.theme().flags().edit_link);
    }

    #[test]
    fn test_head_attributes_keep_declared_order() {
        let raw = RawDeclaration::parse(VEDICSKILL, Format::Toml).unwrap();
        let config = load_site_config(&raw).unwrap();

        let meta = &config.metadata().head()[0];
        let names: Vec<_> = meta.attributes().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "content"]);

        let json = serde_json::to_string(meta).unwrap();
        assert_eq!(
            json,
            r#"{"tag":"meta","attributes":{"name":"viewport","content":"width=device-width, initial-scale=1"}}"#
        );
    }

    #[test]
    fn test_parse_yaml_matches_toml() {
        let yaml = r#"
base: /vedicskill-site/
lang: en-US
title: Vedicskill
description: Data-driven analytics and learning with Vedicskill
theme:
  navbar:
    - text: Home
      link: /
    - text: Documentation
      children:
        - text: MongoDB Atlas Vector DB
          link: /mongodb/mongodb.html
  sidebar:
    /mongodb/:
      - text: MongoDB Docs
        collapsible: true
        children:
          - /mongodb/README.md
          - /mongodb/mongodb.md
  editLink: false
  contributors: false
  lastUpdated: false
bundler:
  name: webpack
"#;
        let raw = RawDeclaration::parse(yaml, Format::Yaml).unwrap();
        assert_eq!(raw, scenario());
    }

    #[test]
    fn test_parse_json_with_aliases() {
        let json = r#"{
  "base": "/vedicskill-site/",
  "lang": "en-US",
  "title": "Vedicskill",
  "description": "Data-driven analytics and learning with Vedicskill",
  "theme": {
    "navbar": [
      {"label": "Home", "target": "/"},
      {"label": "Documentation", "children": [
        {"label": "MongoDB Atlas Vector DB", "target": "/mongodb/mongodb.html"}
      ]}
    ],
    "sidebar": {
      "/mongodb/": [
        {"title": "MongoDB Docs", "collapsible": true,
         "children": ["/mongodb/README.md", "/mongodb/mongodb.md"]}
      ]
    },
    "editLink": false,
    "contributors": false,
    "lastUpdated": false
  },
  "bundler": {"name": "webpack"}
}"#;
        let raw = RawDeclaration::parse(json, Format::Json).unwrap();
        assert_eq!(raw, scenario());
    }

    #[test]
    fn test_parse_json_keeps_repeated_sidebar_keys() {
        let json = r#"{
  "base": "/", "lang": "en-US", "title": "T", "description": "",
  "theme": {
    "navbar": [],
    "sidebar": {
      "/mongodb/": [{"text": "A", "children": ["/a.md"]}],
      "/mongodb/": [{"text": "B", "children": ["/b.md"]}]
    },
    "editLink": false, "contributors": false, "lastUpdated": false
  },
  "bundler": {"name": "vite"}
}"#;
        let raw = RawDeclaration::parse(json, Format::Json).unwrap();
        assert_eq!(raw.theme.sidebar.0.len(), 2);

        let err = load_site_config(&raw).unwrap_err();
        assert_eq!(err.kind(), DeclarationErrorKind::DuplicatePrefix);
    }

    #[test]
    fn test_parse_non_boolean_collapsible_is_malformed() {
        let toml = VEDICSKILL.replace("collapsible = true", "collapsible = \"yes\"");

        let err = RawDeclaration::parse(&toml, Format::Toml).unwrap_err();
        assert!(matches!(err, LoadError::Parse { format: Format::Toml, .. }));
        assert_eq!(
            err.declaration_kind(),
            Some(DeclarationErrorKind::MalformedDeclaration)
        );
    }

    #[test]
    fn test_parse_missing_theme_flag_is_malformed() {
        let toml = VEDICSKILL.replace("lastUpdated = false\n", "");
        let err = RawDeclaration::parse(&toml, Format::Toml).unwrap_err();
        assert!(err.to_string().contains("lastUpdated"));
    }

    #[test]
    fn test_parse_unknown_field_is_rejected() {
        let toml = VEDICSKILL.replace("lang = \"en-US\"", "lang = \"en-US\"\nlanguage = \"en\"");
        assert!(RawDeclaration::parse(&toml, Format::Toml).is_err());
    }

    #[test]
    fn test_bundler_options_are_kept() {
        let toml = VEDICSKILL.replace(
            "name = \"webpack\"",
            "name = \"webpack\"\noptions = { postcss = { sourceMap = true } }",
        );
        let raw = RawDeclaration::parse(&toml, Format::Toml).unwrap();
        let config = load_site_config(&raw).unwrap();
        assert_eq!(
            config.bundler().options().get("postcss"),
            Some(&serde_json::json!({"sourceMap": true}))
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("docnav.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("site.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("site.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("site.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("site")), Format::Toml);
    }

    #[test]
    fn test_raw_sidebar_serializes_as_map_in_order() {
        let raw = scenario();
        let value = serde_json::to_value(&raw.theme.sidebar).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "/mongodb/": [{
                    "text": "MongoDB Docs",
                    "collapsible": true,
                    "children": ["/mongodb/README.md", "/mongodb/mongodb.md"]
                }]
            })
        );
    }
}
