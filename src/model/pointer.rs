//! JSON pointer paths used by patch operations.
//!
//! Paths follow RFC 6901 with one addition: a lone `/` addresses the
//! document root, as the billing API expects for whole-resource patches.

use std::fmt;

use crate::model::patch::PatchError;

/// A parsed JSON pointer.
///
/// # Example
///
/// ```rust
/// use billing_api::JsonPointer;
///
/// let pointer = JsonPointer::parse("/billing_cycles/0/pricing_scheme").unwrap();
/// assert_eq!(pointer.tokens(), ["billing_cycles", "0", "pricing_scheme"]);
///
/// assert!(JsonPointer::parse("/").unwrap().is_root());
/// assert_eq!(JsonPointer::escape_token("a/b~c"), "a~1b~0c");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// Returns the pointer to the document root.
    #[must_use]
    pub const fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parses a pointer string.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::InvalidPointer`] if the path is non-empty and
    /// does not start with `/`, or contains a `~` not followed by `0` or `1`.
    pub fn parse(path: &str) -> Result<Self, PatchError> {
        if path.is_empty() || path == "/" {
            return Ok(Self::root());
        }

        let Some(rest) = path.strip_prefix('/') else {
            return Err(PatchError::InvalidPointer {
                path: path.to_string(),
            });
        };

        let tokens = rest
            .split('/')
            .map(|raw| {
                unescape(raw).ok_or_else(|| PatchError::InvalidPointer {
                    path: path.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tokens })
    }

    /// Builds a pointer to a single top-level field.
    #[must_use]
    pub fn field(name: &str) -> Self {
        Self {
            tokens: vec![name.to_string()],
        }
    }

    /// Returns `true` if this pointer addresses the whole document.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the unescaped reference tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Splits into the parent pointer and the last token.
    ///
    /// Returns `None` for the root pointer.
    #[must_use]
    pub fn split_last(&self) -> Option<(Self, &str)> {
        let (last, parent) = self.tokens.split_last()?;
        Some((
            Self {
                tokens: parent.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Returns `true` if `self` is a proper prefix of `other`.
    #[must_use]
    pub fn is_proper_prefix_of(&self, other: &Self) -> bool {
        self.tokens.len() < other.tokens.len() && other.tokens.starts_with(&self.tokens)
    }

    /// Escapes a single reference token (`~` as `~0`, `/` as `~1`).
    #[must_use]
    pub fn escape_token(token: &str) -> String {
        token.replace('~', "~0").replace('/', "~1")
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tokens.is_empty() {
            return f.write_str("/");
        }
        for token in &self.tokens {
            write!(f, "/{}", Self::escape_token(token))?;
        }
        Ok(())
    }
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}
