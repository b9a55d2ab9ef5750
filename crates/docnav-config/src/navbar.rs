//! Navbar model and builder.
//!
//! The navbar is a flat, ordered list of entries. An entry is either a
//! simple link or a dropdown holding simple links; dropdowns cannot nest.

use serde::Serialize;

use crate::declaration::RawNavbarEntry;
use crate::error::{DeclarationError, DeclarationErrorKind};
use crate::link::LinkTarget;

/// Labeled link in the navbar or inside a dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    #[serde(rename = "text")]
    label: String,
    #[serde(rename = "link")]
    target: LinkTarget,
}

impl NavLink {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Link target.
    #[must_use]
    pub fn target(&self) -> &LinkTarget {
        &self.target
    }
}

/// Top-level navbar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavbarEntry {
    /// Simple link.
    Link(NavLink),
    /// Dropdown group of links.
    Dropdown {
        /// Display label.
        #[serde(rename = "text")]
        label: String,
        /// Links in render order.
        children: Vec<NavLink>,
    },
}

impl NavbarEntry {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link(link) => link.label(),
            Self::Dropdown { label, .. } => label,
        }
    }

    /// Dropdown children (empty for simple links).
    #[must_use]
    pub fn children(&self) -> &[NavLink] {
        match self {
            Self::Link(_) => &[],
            Self::Dropdown { children, .. } => children,
        }
    }
}

/// Build navbar entries, preserving declaration order.
///
/// Errors carry paths relative to the navbar, e.g. `navbar[2].children[0]`.
///
/// # Errors
///
/// - [`DeclarationErrorKind::EmptyLabel`] for a blank label
/// - [`DeclarationErrorKind::UnsupportedNestingDepth`] for a dropdown inside
///   a dropdown
/// - [`DeclarationErrorKind::InvalidLinkKind`] for an invalid target
/// - [`DeclarationErrorKind::MalformedDeclaration`] for an entry with both
///   or neither of `link` and `children`, or an empty dropdown
pub fn build_navbar(entries: &[RawNavbarEntry]) -> Result<Vec<NavbarEntry>, DeclarationError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| build_entry(entry).map_err(|e| e.within(format!("navbar[{i}]"))))
        .collect()
}

fn build_entry(entry: &RawNavbarEntry) -> Result<NavbarEntry, DeclarationError> {
    let label = require_label(&entry.text)?;

    let Some(children) = &entry.children else {
        return build_link(entry).map(NavbarEntry::Link);
    };

    if entry.link.is_some() {
        return Err(DeclarationError::malformed(
            "entry cannot have both `link` and `children`",
        ));
    }
    if children.is_empty() {
        return Err(DeclarationError::malformed("dropdown has no children").within("children"));
    }

    let children = children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            if child.children.is_some() {
                return Err(DeclarationError::new(
                    DeclarationErrorKind::UnsupportedNestingDepth,
                    "dropdown entries cannot contain dropdowns",
                )
                .within(format!("children[{i}]")));
            }
            build_link(child).map_err(|e| e.within(format!("children[{i}]")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NavbarEntry::Dropdown { label, children })
}

fn build_link(entry: &RawNavbarEntry) -> Result<NavLink, DeclarationError> {
    let label = require_label(&entry.text)?;
    let raw = entry
        .link
        .as_deref()
        .ok_or_else(|| DeclarationError::malformed("entry needs `link` or `children`"))?;
    let target = LinkTarget::parse(raw).map_err(|e| e.within("link"))?;
    Ok(NavLink { label, target })
}

fn require_label(text: &str) -> Result<String, DeclarationError> {
    if text.trim().is_empty() {
        return Err(
            DeclarationError::new(DeclarationErrorKind::EmptyLabel, "label cannot be blank")
                .within("text"),
        );
    }
    Ok(text.to_owned())
}
