//! Sidebar model, builder and prefix lookup.
//!
//! The sidebar maps URL prefixes (`/mongodb/`) to ordered groups of page
//! links. A page shows the groups of the longest prefix that matches its
//! path.

use std::cmp::Reverse;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::declaration::RawSidebarGroup;
use crate::error::{DeclarationError, DeclarationErrorKind};
use crate::link::LinkTarget;

/// Titled group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    #[serde(rename = "text")]
    title: String,
    collapsible: bool,
    children: Vec<LinkTarget>,
}

impl SidebarGroup {
    /// Group title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the group can be collapsed.
    #[must_use]
    pub fn collapsible(&self) -> bool {
        self.collapsible
    }

    /// Page links in render order. Never empty.
    #[must_use]
    pub fn children(&self) -> &[LinkTarget] {
        &self.children
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SidebarEntry {
    prefix: String,
    groups: Vec<SidebarGroup>,
}

/// Sidebar groups keyed by normalized URL prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarSection {
    /// Entries in declaration order.
    entries: Vec<SidebarEntry>,
    /// Indices into `entries`, longest prefix first.
    by_length: Vec<usize>,
}

impl SidebarSection {
    /// Groups for the longest registered prefix of `page_path`.
    ///
    /// Returns an empty slice if no prefix matches. Registered prefixes always
    /// end in `/` (see [`build_sidebar`]) and `page_path` is not normalized, so
    /// `/mongodb` does not match the `/mongodb/` section.
    #[must_use]
    pub fn lookup(&self, page_path: &str) -> &[SidebarGroup] {
        self.find(page_path)
            .map(|entry| entry.groups.as_slice())
            .unwrap_or_default()
    }

    /// Longest registered prefix of `page_path`.
    #[must_use]
    pub fn matching_prefix(&self, page_path: &str) -> Option<&str> {
        self.find(page_path).map(|entry| entry.prefix.as_str())
    }

    /// Groups registered under exactly `prefix`.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&[SidebarGroup]> {
        self.entries
            .iter()
            .find(|entry| entry.prefix == prefix)
            .map(|entry| entry.groups.as_slice())
    }

    /// Registered prefixes in declaration order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.prefix.as_str())
    }

    /// Number of registered prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no prefix is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, page_path: &str) -> Option<&SidebarEntry> {
        self.by_length
            .iter()
            .map(|&idx| &self.entries[idx])
            .find(|entry| page_path.starts_with(&entry.prefix))
    }
}

impl Serialize for SidebarSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.prefix, &entry.groups)?;
        }
        map.end()
    }
}

/// Build the sidebar from `(prefix, groups)` pairs.
///
/// Prefixes must start with `/`; a missing trailing `/` is added, so
/// `/mongodb` and `/mongodb/` are the same key. Errors carry paths relative
/// to the sidebar, e.g. `sidebar."/mongodb/"[0].children[1]`.
///
/// # Errors
///
/// - [`DeclarationErrorKind::DuplicatePrefix`] if two keys normalize to the
///   same prefix
/// - [`DeclarationErrorKind::EmptyGroup`] for a group without children
/// - [`DeclarationErrorKind::EmptyLabel`] for a blank group title
/// - [`DeclarationErrorKind::InvalidLinkKind`] for an invalid child link
/// - [`DeclarationErrorKind::MalformedDeclaration`] for a prefix not
///   starting with `/`
pub fn build_sidebar(
    sections: &[(String, Vec<RawSidebarGroup>)],
) -> Result<SidebarSection, DeclarationError> {
    let mut entries: Vec<SidebarEntry> = Vec::with_capacity(sections.len());

    for (key, groups) in sections {
        let at = format!("sidebar.{key:?}");
        let prefix = normalize_prefix(key).map_err(|e| e.within(&at))?;

        if let Some(existing) = entries.iter().find(|entry| entry.prefix == prefix) {
            return Err(DeclarationError::new(
                DeclarationErrorKind::DuplicatePrefix,
                format!("prefix {:?} is already declared", existing.prefix),
            )
            .within(&at));
        }

        let groups = groups
            .iter()
            .enumerate()
            .map(|(i, group)| build_group(group).map_err(|e| e.within(format!("{at}[{i}]"))))
            .collect::<Result<Vec<_>, _>>()?;

        entries.push(SidebarEntry { prefix, groups });
    }

    let mut by_length: Vec<usize> = (0..entries.len()).collect();
    by_length.sort_by_key(|&idx| Reverse(entries[idx].prefix.len()));

    Ok(SidebarSection { entries, by_length })
}

fn normalize_prefix(key: &str) -> Result<String, DeclarationError> {
    if !key.starts_with('/') {
        return Err(DeclarationError::malformed(format!(
            "sidebar prefix {key:?} must start with '/'"
        )));
    }
    if key.ends_with('/') {
        Ok(key.to_owned())
    } else {
        Ok(format!("{key}/"))
    }
}

fn build_group(group: &RawSidebarGroup) -> Result<SidebarGroup, DeclarationError> {
    if group.text.trim().is_empty() {
        return Err(DeclarationError::new(
            DeclarationErrorKind::EmptyLabel,
            "group title cannot be blank",
        )
        .within("text"));
    }
    if group.children.is_empty() {
        return Err(DeclarationError::new(
            DeclarationErrorKind::EmptyGroup,
            format!("group {:?} has no children", group.text),
        )
        .within("children"));
    }

    let children = group
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            LinkTarget::parse(child).map_err(|e| e.within(format!("children[{i}]")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SidebarGroup {
        title: group.text.clone(),
        collapsible: group.collapsible.unwrap_or(false),
        children,
    })
}
