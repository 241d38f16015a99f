//! Field annotation parsing.
//!
//! Annotations are compact `key:value` lists attached to record fields, for
//! example `usage:'listen address, host:port',default:127.0.0.1:8080`.
//! Commas inside single quotes do not split segments, and only the first `:`
//! of a segment separates key from value, so values may contain colons.

use crate::error::{CliveError, CliveResult};
use crate::literal::parse_bool;

/// Structured form of a field annotation.
///
/// Keys absent from the annotation keep their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Flag name override. `None` when the key is absent or empty.
    pub name: Option<String>,
    /// Help text with surrounding single quotes stripped.
    pub usage: String,
    /// Whether the flag is left out of help output.
    pub hidden: bool,
    /// Default value literal, kept verbatim.
    pub default: String,
}

impl Metadata {
    /// Parses an annotation string.
    ///
    /// # Errors
    ///
    /// Returns [`CliveError::MalformedTag`] for a segment without `:`,
    /// [`CliveError::UnknownKey`] for a key outside `name`, `usage`,
    /// `hidden` and `default`, and [`CliveError::InvalidHidden`] when
    /// `hidden` is not a boolean literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use clive::Metadata;
    /// let meta = Metadata::parse("usage:'a,b,c',default:1")?;
    /// assert_eq!(meta.usage, "a,b,c");
    /// assert_eq!(meta.default, "1");
    /// # Ok::<(), clive::CliveError>(())
    /// ```
    pub fn parse(tag: &str) -> CliveResult<Self> {
        let mut meta = Self::default();
        for segment in split_segments(tag) {
            meta.apply(segment)?;
        }
        Ok(meta)
    }

    fn apply(&mut self, segment: &str) -> CliveResult<()> {
        let Some((key, value)) = segment.split_once(':') else {
            return Err(CliveError::MalformedTag {
                segment: segment.to_owned(),
            });
        };
        match key {
            "name" => self.name = (!value.is_empty()).then(|| value.to_owned()),
            "usage" => value.trim_matches('\'').clone_into(&mut self.usage),
            "hidden" => {
                self.hidden = if value.is_empty() {
                    false
                } else {
                    parse_bool(value).ok_or_else(|| CliveError::InvalidHidden {
                        value: value.to_owned(),
                    })?
                };
            }
            "default" => value.clone_into(&mut self.default),
            _ => {
                return Err(CliveError::UnknownKey {
                    key: key.to_owned(),
                    segment: segment.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// The default literal with surrounding single quotes removed.
    #[must_use]
    pub fn default_literal(&self) -> &str {
        self.default.trim_matches('\'')
    }

    /// The name override, if one was given.
    #[must_use]
    pub fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Splits `tag` on commas that sit outside single-quoted spans.
///
/// Empty segments are dropped, so stray or trailing commas are harmless.
pub(crate) fn split_segments(tag: &str) -> impl Iterator<Item = &str> {
    let mut quoted = false;
    tag.split(move |c: char| {
        if c == '\'' {
            quoted = !quoted;
        }
        c == ',' && !quoted
    })
    .filter(|segment| !segment.is_empty())
}
