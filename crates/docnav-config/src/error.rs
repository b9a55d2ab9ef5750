//! Error types for declaration loading.
//!
//! [`DeclarationError`] reports a validation failure together with the
//! location of the offending value inside the declaration, e.g.
//! `theme.navbar[2].children[0].link`. [`LoadError`] covers everything that
//! can go wrong between a file on disk and a [`SiteConfig`](crate::SiteConfig).

use std::fmt;
use std::path::PathBuf;

use crate::declaration::Format;

/// Semantic category of a declaration error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationErrorKind {
    /// Link is neither an external URL nor a site-relative path.
    InvalidLinkKind,
    /// Navbar dropdown child has children of its own.
    UnsupportedNestingDepth,
    /// Label or title is empty or whitespace.
    EmptyLabel,
    /// Two sidebar keys normalize to the same prefix.
    DuplicatePrefix,
    /// Sidebar group has no children.
    EmptyGroup,
    /// Value has the wrong shape.
    MalformedDeclaration,
}

impl fmt::Display for DeclarationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidLinkKind => "Invalid link kind",
            Self::UnsupportedNestingDepth => "Unsupported nesting depth",
            Self::EmptyLabel => "Empty label",
            Self::DuplicatePrefix => "Duplicate prefix",
            Self::EmptyGroup => "Empty group",
            Self::MalformedDeclaration => "Malformed declaration",
        };
        f.write_str(name)
    }
}

/// Validation error with the path of the offending value.
///
/// Builders create errors relative to the value they validate and callers
/// prefix their own location with [`DeclarationError::within`], so the final
/// path is assembled while the error propagates outwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationError {
    kind: DeclarationErrorKind,
    path: String,
    message: String,
}

impl DeclarationError {
    /// Create an error for the value at the current location.
    #[must_use]
    pub fn new(kind: DeclarationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: String::new(),
            message: message.into(),
        }
    }

    /// Shorthand for [`DeclarationErrorKind::MalformedDeclaration`].
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(DeclarationErrorKind::MalformedDeclaration, message)
    }

    /// Prefix the error path with the location of an enclosing value.
    ///
    /// Index segments (`[3]`) are appended directly, field segments are
    /// joined with a dot.
    #[must_use]
    pub fn within(mut self, parent: impl AsRef<str>) -> Self {
        let parent = parent.as_ref();
        self.path = if self.path.is_empty() {
            parent.to_owned()
        } else if self.path.starts_with('[') {
            format!("{parent}{}", self.path)
        } else {
            format!("{parent}.{}", self.path)
        };
        self
    }

    /// Error category.
    #[must_use]
    pub fn kind(&self) -> DeclarationErrorKind {
        self.kind
    }

    /// Location of the offending value (empty for the declaration root).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Human-readable detail.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(f, "{} at {}: {}", self.kind, self.path, self.message)
        }
    }
}

impl std::error::Error for DeclarationError {}

/// Error returned when loading a site declaration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Declaration file not found.
    #[error("Declaration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Source text is not valid for its format or does not match the
    /// declaration shape.
    #[error("Malformed declaration ({format}): {message}")]
    Parse {
        /// Source format.
        format: Format,
        /// Parser message, including the location reported by the parser.
        message: String,
    },
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Declaration field (e.g., "base").
        field: String,
        /// Error message (e.g., "${`SITE_BASE`} not set").
        message: String,
    },
    /// Declaration failed validation.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

impl LoadError {
    /// Declaration error category, if this error comes from validation or
    /// parsing.
    #[must_use]
    pub fn declaration_kind(&self) -> Option<DeclarationErrorKind> {
        match self {
            Self::Declaration(e) => Some(e.kind()),
            Self::Parse { .. } => Some(DeclarationErrorKind::MalformedDeclaration),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_builds_dotted_path() {
        let err = DeclarationError::malformed("bad")
            .within("link")
            .within("[0]")
            .within("children")
            .within("[1]")
            .within("navbar")
            .within("theme");

        assert_eq!(err.path(), "theme.navbar[1].children[0].link");
    }

    #[test]
    fn test_display_includes_kind_path_and_message() {
        let err = DeclarationError::new(DeclarationErrorKind::EmptyGroup, "group has no children")
            .within("sidebar.\"/mongodb/\"[0]");

        assert_eq!(
            err.to_string(),
            "Empty group at sidebar.\"/mongodb/\"[0]: group has no children"
        );
    }

    #[test]
    fn test_display_without_path() {
        let err = DeclarationError::new(DeclarationErrorKind::InvalidLinkKind, "oops");
        assert_eq!(err.to_string(), "Invalid link kind: oops");
    }

    #[test]
    fn test_load_error_declaration_kind() {
        let err = LoadError::from(DeclarationError::new(
            DeclarationErrorKind::DuplicatePrefix,
            "dup",
        ));
        assert_eq!(
            err.declaration_kind(),
            Some(DeclarationErrorKind::DuplicatePrefix)
        );

        let err = LoadError::Parse {
            format: Format::Toml,
            message: "expected a boolean".to_owned(),
        };
        assert_eq!(
            err.declaration_kind(),
            Some(DeclarationErrorKind::MalformedDeclaration)
        );

        let err = LoadError::NotFound(PathBuf::from("docnav.toml"));
        assert_eq!(err.declaration_kind(), None);
    }
}
