//! The micro grammar of a single stanza line: `tag: value qualifiers ! comment`

use std::sync::LazyLock;

use regex::Regex;

static TAG_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z_]+):\s+(\S.*)$").unwrap());
static QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.*?)\s*\[(.*)\]$").unwrap());
static RELATIONSHIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+(\S+)$").unwrap());

/// A single stanza line after tokenisation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Line<'a> {
    /// A line without a colon or a comment line, these have no effect
    Ignored,
    /// A line with a colon that does not follow the `tag: value` shape
    Malformed,
    /// A proper line
    Tagged(TaggedLine<'a>),
}

/// The tag, the (unquoted) value, and any raw trailing qualifiers of a line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TaggedLine<'a> {
    pub(crate) tag: &'a str,
    pub(crate) value: &'a str,
    pub(crate) qualifiers: &'a str,
}

pub(crate) fn tokenise_line(line: &str) -> Line<'_> {
    if !line.contains(':') || line.starts_with('!') {
        return Line::Ignored;
    }
    let Some(captures) = TAG_VALUE.captures(line) else {
        return Line::Malformed;
    };
    let (Some(tag), Some(value)) = (captures.get(1), captures.get(2)) else {
        return Line::Malformed;
    };
    let value = strip_comment(value.as_str());
    let (value, qualifiers) = split_quoted(value).unwrap_or((value, ""));
    Line::Tagged(TaggedLine {
        tag: tag.as_str(),
        value,
        qualifiers,
    })
}

/// Remove the trailing comment. The comment starts at the last `!` that is not escaped and is
/// followed by at least one character. Quotes are not taken into account, so an unescaped `!`
/// inside a quoted value also starts a comment.
pub(crate) fn strip_comment(value: &str) -> &str {
    let mut comment_start = None;
    let mut escaped = false;
    for (index, char) in value.char_indices() {
        if char == '!' && !escaped && index + 1 < value.len() {
            comment_start = Some(index);
        }
        escaped = char == '\\';
    }
    comment_start.map_or(value, |start| value[..start].trim_end())
}

/// Split `"quoted value" trailing qualifiers` into the quoted text and the qualifiers. The
/// closing quote is the first unescaped quote that ends the value or is followed by whitespace.
pub(crate) fn split_quoted(value: &str) -> Option<(&str, &str)> {
    let inner = value.strip_prefix('"')?;
    let mut escaped = false;
    for (index, char) in inner.char_indices() {
        if char == '"' && !escaped {
            let rest = &inner[index + 1..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return Some((&inner[..index], rest.trim_start()));
            }
        }
        escaped = char == '\\';
    }
    None
}

/// Split qualifiers of the shape `SCOPE [content]` into the scope, if any, and the bracket content
pub(crate) fn split_qualifiers(qualifiers: &str) -> Option<(Option<&str>, &str)> {
    let captures = QUALIFIER.captures(qualifiers)?;
    let scope = captures
        .get(1)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty());
    Some((scope, captures.get(2)?.as_str()))
}

/// The source of a definition is the second element in its dbxref list, if it is not empty
pub(crate) fn definition_source(content: &str) -> Option<&str> {
    content
        .split(',')
        .nth(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Split `relationship_type target` into its two parts
pub(crate) fn split_relationship(value: &str) -> Option<(&str, &str)> {
    let captures = RELATIONSHIP.captures(value)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Unescape `\{` and `\}`, all other escapes are left as is
pub(crate) fn unescape_braces(text: &str) -> Box<str> {
    text.replace("\\{", "{").replace("\\}", "}").into_boxed_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(line: &str) -> TaggedLine<'_> {
        match tokenise_line(line) {
            Line::Tagged(t) => t,
            other => panic!("Line `{line}` was not tagged but {other:?}"),
        }
    }

    #[test]
    fn ignored_lines() {
        assert_eq!(tokenise_line("foo bar"), Line::Ignored);
        assert_eq!(tokenise_line(""), Line::Ignored);
        assert_eq!(tokenise_line("! comment: with a colon"), Line::Ignored);
    }

    #[test]
    fn malformed_lines() {
        assert_eq!(tokenise_line("id:GO:0000001"), Line::Malformed);
        assert_eq!(tokenise_line("Name: x"), Line::Malformed);
        assert_eq!(tokenise_line("name:"), Line::Malformed);
        assert_eq!(tokenise_line("has-dash: x"), Line::Malformed);
    }

    #[test]
    fn plain_values() {
        let line = tagged("id: GO:0000001");
        assert_eq!(line.tag, "id");
        assert_eq!(line.value, "GO:0000001");
        assert_eq!(line.qualifiers, "");
        assert_eq!(tagged("is_a:   GO:0048308").value, "GO:0048308");
        assert_eq!(tagged("name: water  ").value, "water  ");
    }

    #[test]
    fn comments() {
        assert_eq!(
            tagged("is_a: GO:0048308 ! organelle inheritance").value,
            "GO:0048308"
        );
        assert_eq!(tagged(r"name: hello\! world").value, r"hello\! world");
        assert_eq!(tagged("name: a ! b ! c").value, "a ! b");
        assert_eq!(tagged("name: surprise!").value, "surprise!");
        assert_eq!(strip_comment(r"a \!b"), r"a \!b");
        assert_eq!(strip_comment("foo ! "), "foo");
        assert_eq!(tagged(r#"def: "Wow! great" [a, b]"#).value, r#""Wow"#);
    }

    #[test]
    fn quoted_values() {
        let line = tagged(r#"synonym: "foo bar" EXACT []"#);
        assert_eq!(line.value, "foo bar");
        assert_eq!(line.qualifiers, "EXACT []");
        let line = tagged(r#"def: "with \"escaped\" quotes" [PMID:1] ! comment"#);
        assert_eq!(line.value, r#"with \"escaped\" quotes"#);
        assert_eq!(line.qualifiers, "[PMID:1]");
        assert_eq!(split_quoted(r#""a"b" c"#), Some((r#"a"b"#, "c")));
        assert_eq!(split_quoted(r#""only""#), Some(("only", "")));
        assert_eq!(
            tagged(r#"synonym: "a" EXACT [] "#).qualifiers,
            "EXACT [] "
        );
        assert_eq!(split_quoted(r#""unclosed"#), None);
        assert_eq!(split_quoted("plain"), None);
    }

    #[test]
    fn qualifiers() {
        assert_eq!(split_qualifiers("EXACT []"), Some((Some("EXACT"), "")));
        assert_eq!(
            split_qualifiers("RELATED IUPAC_NAME [IUPAC:1, x]"),
            Some((Some("RELATED IUPAC_NAME"), "IUPAC:1, x"))
        );
        assert_eq!(split_qualifiers("[PMID:555]"), Some((None, "PMID:555")));
        assert_eq!(split_qualifiers("EXACT"), None);
        assert_eq!(split_qualifiers(""), None);
        assert_eq!(split_qualifiers("EXACT [] {a=b}"), None);
    }

    #[test]
    fn definition_sources() {
        assert_eq!(definition_source("PMID:555"), None);
        assert_eq!(definition_source("src, PMID:555"), Some("PMID:555"));
        assert_eq!(definition_source("src, "), None);
        assert_eq!(definition_source(""), None);
    }

    #[test]
    fn relationships() {
        assert_eq!(
            split_relationship("has_role CHEBI:123"),
            Some(("has_role", "CHEBI:123"))
        );
        assert_eq!(split_relationship("part_of"), None);
        assert_eq!(split_relationship("part_of A B"), None);
    }

    #[test]
    fn braces() {
        assert_eq!(&*unescape_braces(r"\{1\}-thing"), "{1}-thing");
        assert_eq!(&*unescape_braces(r"a\nb"), r"a\nb");
    }
}
