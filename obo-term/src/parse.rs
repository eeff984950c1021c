use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};

use context_error::{BoxedError, Context, CreateError};

use crate::{
    OboTermError, Synonym, Term,
    term::insert_non_empty,
    tokenise::{
        Line, TaggedLine, definition_source, split_qualifiers, split_relationship,
        tokenise_line, unescape_braces,
    },
};

/// The relationship type that is also recorded as an `is_a` edge
const HAS_ROLE: &str = "has_role";

/// The tags that get special treatment, all other tags are kept as is
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Tag<'a> {
    Id,
    Name,
    Def,
    AltId,
    IsA,
    Synonym,
    Relationship,
    Other(&'a str),
}

impl<'a> From<&'a str> for Tag<'a> {
    fn from(value: &'a str) -> Self {
        match value {
            "id" => Self::Id,
            "name" => Self::Name,
            "def" => Self::Def,
            "alt_id" => Self::AltId,
            "is_a" => Self::IsA,
            "synonym" => Self::Synonym,
            "relationship" => Self::Relationship,
            other => Self::Other(other),
        }
    }
}

/// The state of a term while its stanza is being parsed
#[derive(Debug, Default)]
struct TermBuilder {
    id: Option<Box<str>>,
    name: Option<Box<str>>,
    definition: Option<Box<str>>,
    definition_source: Option<Box<str>>,
    synonyms: Vec<Synonym>,
    is_a: BTreeSet<Box<str>>,
    alt_ids: BTreeSet<Box<str>>,
    relationships: BTreeMap<Box<str>, BTreeSet<Box<str>>>,
    other_properties: BTreeMap<Box<str>, Vec<Box<str>>>,
}

impl TermBuilder {
    /// Add a single tokenised line to the term.
    /// # Errors
    /// If this defines a second name for this term.
    fn add(
        &mut self,
        line: TaggedLine<'_>,
        context: impl Fn() -> Context<'static>,
    ) -> Result<(), BoxedError<'static, OboTermError>> {
        let TaggedLine {
            tag,
            value,
            qualifiers,
        } = line;
        match Tag::from(tag) {
            Tag::Id => self.id = Some(value.trim().into()),
            Tag::Name => {
                if let Some(name) = &self.name {
                    return Err(BoxedError::new(
                        OboTermError::DuplicateName,
                        "Duplicate name",
                        format!(
                            "The name is already defined for id '{}', existing name: '{name}', new name: '{value}'",
                            self.id.as_deref().unwrap_or_default()
                        ),
                        context(),
                    ));
                }
                self.name = Some(unescape_braces(value));
            }
            Tag::Def => {
                self.definition = Some(value.into());
                if let Some(source) =
                    split_qualifiers(qualifiers).and_then(|(_, content)| definition_source(content))
                {
                    self.definition_source = Some(source.into());
                }
            }
            Tag::AltId => insert_non_empty(&mut self.alt_ids, value.into()),
            Tag::IsA => insert_non_empty(&mut self.is_a, value.into()),
            Tag::Synonym => {
                if let Some((scope, content)) = split_qualifiers(qualifiers) {
                    self.synonyms.push(Synonym::new(
                        unescape_braces(value),
                        scope.map(Into::into),
                        Some(content.into()),
                    ));
                } else {
                    tracing::debug!(
                        synonym = value,
                        qualifiers,
                        "Dropped synonym without a `SCOPE [dbxrefs]` qualifier"
                    );
                }
            }
            Tag::Relationship => {
                if let Some((kind, target)) = split_relationship(value) {
                    self.relationships
                        .entry(kind.into())
                        .or_default()
                        .insert(target.into());
                    if kind == HAS_ROLE {
                        insert_non_empty(&mut self.is_a, target.into());
                    }
                } else {
                    tracing::debug!(value, "Ignored relationship that is not `type target`");
                }
            }
            Tag::Other(tag) => self
                .other_properties
                .entry(tag.into())
                .or_default()
                .push(value.into()),
        }
        Ok(())
    }

    /// Check that all mandatory fields are set.
    /// # Errors
    /// If the id or name is missing.
    fn build<S: AsRef<str>>(
        self,
        lines: &[S],
    ) -> Result<Term, BoxedError<'static, OboTermError>> {
        let missing = |kind: OboTermError, field: &str| {
            let joined = lines
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(";;");
            BoxedError::new(
                kind,
                "Missing mandatory field",
                format!("The {field} should be defined for Term {joined}"),
                Context::none(),
            )
        };
        let id = self.id.ok_or_else(|| missing(OboTermError::MissingId, "id"))?;
        let name = self
            .name
            .ok_or_else(|| missing(OboTermError::MissingName, "name"))?;
        Ok(Term {
            id,
            name,
            definition: self.definition,
            definition_source: self.definition_source,
            synonyms: self.synonyms,
            is_a: self.is_a,
            is_type_of: BTreeSet::new(),
            alt_ids: self.alt_ids,
            relationships: self.relationships,
            other_properties: self.other_properties,
        })
    }
}

impl Term {
    /// Parse a term from the lines of a single `[Term]` stanza, excluding the `[Term]` header
    /// itself. Lines without a colon and comment lines are skipped. Synonyms without a
    /// `SCOPE [dbxrefs]` qualifier and relationships that are not `type target` are dropped.
    /// # Errors
    /// * If a line contains a colon but is not a valid `tag: value` line.
    /// * If the name is defined twice.
    /// * If the id or name is not defined.
    pub fn from_lines<S: AsRef<str>>(
        lines: &[S],
    ) -> Result<Self, BoxedError<'static, OboTermError>> {
        let mut builder = TermBuilder::default();
        for (line_index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let context = || {
                Context::none()
                    .line_index(line_index as u32)
                    .lines(0, line.to_string())
            };
            match tokenise_line(line) {
                Line::Ignored => {
                    tracing::trace!(line, "Skipped line without a tag");
                }
                Line::Malformed => {
                    return Err(BoxedError::new(
                        OboTermError::MalformedLine,
                        "Invalid Obo line",
                        format!("Illegal format for line '{line}', expected `tag: value`"),
                        context(),
                    ));
                }
                Line::Tagged(tagged) => builder.add(tagged, context)?,
            }
        }
        builder.build(lines)
    }
}

impl FromStr for Term {
    type Err = BoxedError<'static, OboTermError>;

    /// Parse a term from the text of a single `[Term]` stanza, see [`Self::from_lines`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_lines(&s.lines().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::Tag;

    #[test]
    fn tag_dispatch() {
        assert_eq!(Tag::from("id"), Tag::Id);
        assert_eq!(Tag::from("name"), Tag::Name);
        assert_eq!(Tag::from("def"), Tag::Def);
        assert_eq!(Tag::from("alt_id"), Tag::AltId);
        assert_eq!(Tag::from("is_a"), Tag::IsA);
        assert_eq!(Tag::from("synonym"), Tag::Synonym);
        assert_eq!(Tag::from("relationship"), Tag::Relationship);
        assert_eq!(Tag::from("xref"), Tag::Other("xref"));
        assert_eq!(Tag::from("is_obsolete"), Tag::Other("is_obsolete"));
    }
}
