//! Constructors for `CliveError` variants that carry owned context.

use super::CliveError;

impl CliveError {
    /// Build an [`CliveError::UnsupportedType`] naming `type_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clive::CliveError;
    /// let err = CliveError::unsupported_type("HashMap<String, u8>");
    /// assert!(err.to_string().contains("HashMap<String, u8>"));
    /// ```
    #[must_use]
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Build a [`CliveError::Structure`] for `record`.
    #[must_use]
    pub fn structure(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Structure {
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`CliveError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Wrap `self` with the name of the field it was raised for.
    ///
    /// # Examples
    ///
    /// ```
    /// use clive::CliveError;
    /// let err = CliveError::unsupported_type("char").in_field("flag_sep");
    /// assert!(matches!(err, CliveError::Field { ref field, .. } if field == "flag_sep"));
    /// ```
    #[must_use]
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through [`CliveError::Field`]
    /// wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<clap::Error> for CliveError {
    fn from(err: clap::Error) -> Self {
        Self::CliParsing(Box::new(err))
    }
}
