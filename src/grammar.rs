//! The public façade for compiling PEG source into a ready-to-use grammar (§4.5).

use crate::error::{GrammarError, SyntaxError};
use crate::generator;
use crate::matcher::Matcher;
use crate::meta_grammar;
use crate::node::Node;
use crate::resolver::ReferenceResolver;
use std::rc::Rc;

/// A grammar compiled from PEG source text: a resolved matcher graph ready to parse input.
///
/// # Literal and class tokenization
///
/// String literals (`'...'`, `"..."`) and character classes (`[...]`) scan up to their
/// closing delimiter, treating a backslash as escaping the next character — so a
/// backslash-escaped instance of the token's own delimiter (`'it\'s'`, `[a\]z]`) does not
/// end the token early. [`Grammar::new`] always picks the first unescaped closing
/// delimiter, matching this crate's meta-grammar (§4.2) rather than a truly greedy scan.
pub struct Grammar {
    entry: Rc<Matcher>,
}

impl Grammar {
    /// Compile `source` into a `Grammar`.
    ///
    /// The pipeline is: match `source` against [`meta_grammar::entry`], require it to
    /// consume the source in full, fold the resulting tree into an unresolved rule list
    /// (§4.3), then resolve every [`Reference`](crate::matcher::MatcherKind::Reference)
    /// against that list (§4.4). The first rule the source defines becomes the root.
    pub fn new(source: &str) -> Result<Grammar, GrammarError> {
        let tree = meta_grammar::entry()
            .match_text(source)
            .ok_or_else(|| GrammarError::syntax(source))?;
        if tree.len() != source.len() {
            return Err(GrammarError::syntax(&source[tree.len()..]));
        }
        let rules = generator::generate(&tree)?;
        let entry = ReferenceResolver::resolve_rules(&rules)?;
        Ok(Grammar { entry })
    }

    /// Parse `input` against this grammar's root rule. Fails unless the root rule
    /// consumes the entire input.
    pub fn parse(&self, input: &str) -> Result<Node, SyntaxError> {
        match self.entry.match_text(input) {
            Some(node) if node.len() == input.len() => Ok(node),
            Some(node) => Err(SyntaxError::unparsed(node.len(), &input[node.len()..])),
            None => Err(SyntaxError::unparsed(0, input)),
        }
    }

    /// The resolved root matcher, for embedding this grammar as a sub-expression of a
    /// [`crate::language::Language`].
    pub fn entry(&self) -> &Rc<Matcher> {
        &self.entry
    }
}
