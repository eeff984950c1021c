use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use bincode::{Decode, Encode};

use crate::Synonym;

/// A term from an OBO ontology. Parse one from the lines of a `[Term]` stanza with
/// [`Self::from_lines`] or create a minimal term with [`Self::new`].
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Decode, Default, Encode, Eq, PartialEq)]
pub struct Term {
    pub(crate) id: Box<str>,
    pub(crate) name: Box<str>,
    pub(crate) definition: Option<Box<str>>,
    pub(crate) definition_source: Option<Box<str>>,
    pub(crate) synonyms: Vec<Synonym>,
    pub(crate) is_a: BTreeSet<Box<str>>,
    pub(crate) is_type_of: BTreeSet<Box<str>>,
    pub(crate) alt_ids: BTreeSet<Box<str>>,
    pub(crate) relationships: BTreeMap<Box<str>, BTreeSet<Box<str>>>,
    pub(crate) other_properties: BTreeMap<Box<str>, Vec<Box<str>>>,
}

impl Term {
    /// Create a term with only an id and a name, all other fields are left empty.
    pub fn new(id: impl Into<Box<str>>, name: impl Into<Box<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// The ontology identifier of the term
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The name of the term
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The definition of the term
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    /// The source of the definition, the second element of the `def` dbxref list
    pub fn definition_source(&self) -> Option<&str> {
        self.definition_source.as_deref()
    }

    /// The synonyms in the order they were defined
    pub fn synonyms(&self) -> &[Synonym] {
        &self.synonyms
    }

    /// Replace all synonyms
    pub fn set_synonyms(&mut self, synonyms: Vec<Synonym>) {
        self.synonyms = synonyms;
    }

    /// Add a synonym without a scope or qualifier
    pub fn add_synonym(&mut self, synonym: impl Into<Box<str>>) {
        self.synonyms.push(Synonym::new(synonym, None, None));
    }

    /// The ids of all parent terms. This includes all targets of `has_role` relationships.
    pub const fn is_a(&self) -> &BTreeSet<Box<str>> {
        &self.is_a
    }

    /// Add a parent term, empty ids are ignored
    pub fn add_is_a(&mut self, term_id: impl Into<Box<str>>) {
        insert_non_empty(&mut self.is_a, term_id.into());
    }

    /// The ids of all child terms. These are never set by the parser, but are filled in by
    /// whatever builds the ontology graph with [`Self::add_is_type_of`].
    pub const fn is_type_of(&self) -> &BTreeSet<Box<str>> {
        &self.is_type_of
    }

    /// Add a child term, empty ids are ignored
    pub fn add_is_type_of(&mut self, term_id: impl Into<Box<str>>) {
        insert_non_empty(&mut self.is_type_of, term_id.into());
    }

    /// The alternative ids for this term
    pub const fn alt_ids(&self) -> &BTreeSet<Box<str>> {
        &self.alt_ids
    }

    /// All relationships, keyed by relationship type
    pub const fn relationships(&self) -> &BTreeMap<Box<str>, BTreeSet<Box<str>>> {
        &self.relationships
    }

    /// The targets of a single relationship type
    pub fn relationship(&self, kind: &str) -> Option<&BTreeSet<Box<str>>> {
        self.relationships.get(kind)
    }

    /// All values of a tag that has no dedicated field, in the order they were defined
    pub fn other_properties(&self, tag: &str) -> Option<&[Box<str>]> {
        self.other_properties.get(tag).map(Vec::as_slice)
    }

    /// All tags that have no dedicated field
    pub fn other_tags(&self) -> impl Iterator<Item = &str> {
        self.other_properties.keys().map(AsRef::as_ref)
    }
}

pub(crate) fn insert_non_empty(set: &mut BTreeSet<Box<str>>, value: Box<str>) {
    if !value.is_empty() {
        set.insert(value);
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[name={}, id={}", self.name, self.id)?;
        if let Some(def) = &self.definition {
            write!(f, ", def={def}")?;
        }
        if let Some(source) = &self.definition_source {
            write!(f, ", defSrc={source}")?;
        }
        for alt in &self.alt_ids {
            write!(f, ", alt_id={alt}")?;
        }
        for parent in &self.is_a {
            write!(f, ", is_a={parent}")?;
        }
        for (kind, targets) in &self.relationships {
            for target in targets {
                write!(f, ", {kind}={target}")?;
            }
        }
        for synonym in &self.synonyms {
            write!(f, ", syn={synonym}")?;
        }
        write!(f, "]")
    }
}
