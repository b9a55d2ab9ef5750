//! Link target classification.
//!
//! Every link in a declaration is either an absolute external URL
//! (`https://example.com/`, `mailto:team@example.com`) or a site-relative
//! path starting with `/`. Internal paths are kept as written; resolving
//! them against the content tree is left to the renderer.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{DeclarationError, DeclarationErrorKind};

/// Validated link target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    /// Absolute URL with a scheme.
    External(String),
    /// Site-relative path (starts with `/`).
    Internal(String),
}

impl LinkTarget {
    /// Classify a raw link string.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationErrorKind::InvalidLinkKind`] if the string has
    /// no URL scheme and does not start with a single `/`.
    pub fn parse(raw: &str) -> Result<Self, DeclarationError> {
        if has_scheme(raw) {
            return Ok(Self::External(raw.to_owned()));
        }
        if raw.starts_with('/') && !raw.starts_with("//") {
            return Ok(Self::Internal(raw.to_owned()));
        }
        Err(DeclarationError::new(
            DeclarationErrorKind::InvalidLinkKind,
            format!("{raw:?} is neither an absolute URL nor a path starting with '/'"),
        ))
    }

    /// Raw link string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::External(url) => url,
            Self::Internal(path) => path,
        }
    }

    /// Whether the link points outside the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Link as it appears in rendered HTML for a site served under `base`.
    ///
    /// Internal paths get the base path prepended; external URLs are
    /// returned unchanged.
    #[must_use]
    pub fn href(&self, base: &str) -> String {
        match self {
            Self::External(url) => url.clone(),
            Self::Internal(path) => {
                format!("{}{path}", base.trim_end_matches('/'))
            }
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LinkTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// RFC 3986 scheme: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`.
fn has_scheme(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
