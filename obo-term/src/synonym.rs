use std::fmt::Display;

use bincode::{Decode, Encode};

/// A synonym of an ontology term, as given by a `synonym` tag
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Decode, Default, Encode, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Synonym {
    text: Box<str>,
    scope: Option<Box<str>>,
    qualifier: Option<Box<str>>,
}

impl Synonym {
    /// Create a new synonym. The scope is stored as is, so any scope outside of the usual
    /// `EXACT`, `BROAD`, `NARROW`, and `RELATED` is retained.
    pub fn new(
        text: impl Into<Box<str>>,
        scope: Option<Box<str>>,
        qualifier: Option<Box<str>>,
    ) -> Self {
        Self {
            text: text.into(),
            scope,
            qualifier,
        }
    }

    /// The synonym itself
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The scope, and optionally the synonym type name, if given
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// The raw content of the bracketed qualifier (generally a dbxref list), if given
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

impl Display for Synonym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)?;
        if let Some(scope) = &self.scope {
            write!(f, " ({scope})")?;
        }
        if let Some(qualifier) = &self.qualifier {
            write!(f, " [{qualifier}]")?;
        }
        Ok(())
    }
}
