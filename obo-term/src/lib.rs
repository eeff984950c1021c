//! # Reading OBO terms
//! This library parses a single `[Term]` stanza of an OBO ontology into a [`Term`], containing
//! all information needed for lexical matching: the id, name, definition, synonyms, and the
//! relationships to other terms. Splitting an ontology file into stanzas and building the term
//! graph from the parsed terms is left to the caller.
//!
//! ```
//! use obo_term::Term;
//!
//! let term = Term::from_lines(&[
//!     "id: CHEBI:15377",
//!     "name: water",
//!     r#"synonym: "H2O" EXACT [ChEBI:]"#,
//!     "is_a: CHEBI:33579 ! main group molecular entity",
//! ])
//! .unwrap();
//! assert_eq!(term.name(), "water");
//! assert_eq!(term.synonyms()[0].text(), "H2O");
//! assert!(term.is_a().contains("CHEBI:33579"));
//! ```
//!
//! # Features
//! * `serde` derives `Serialize` and `Deserialize` for [`Term`] and [`Synonym`].
//! * `coloured-errors` turns on coloured output for the returned errors.

mod error;
mod parse;
mod synonym;
mod term;
mod tokenise;

pub use error::*;
pub use synonym::*;
pub use term::*;
