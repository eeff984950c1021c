//! The [`OboTermError`] which makes it easy for downstream users of the error type to match on the exact error.

use context_error::ErrorKind;

/// All possible errors when parsing a single `[Term]` stanza
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OboTermError {
    /// A line contains a colon but does not follow the `tag: value` shape
    #[default]
    MalformedLine,
    /// A second `name` tag was found for a term that already has a name
    DuplicateName,
    /// The stanza never defined an `id`
    MissingId,
    /// The stanza never defined a `name`
    MissingName,
}

impl OboTermError {
    /// If this error signals that one of the mandatory fields was never set
    pub const fn is_missing_field(self) -> bool {
        matches!(self, Self::MissingId | Self::MissingName)
    }
}

impl ErrorKind for OboTermError {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        "error"
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        true
    }
}
