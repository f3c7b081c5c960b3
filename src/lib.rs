//! `peg-pt` compiles a textual parsing expression grammar (PEG) into a matcher graph and
//! evaluates input against it, producing a parse tree or — with [`Language`] — a folded
//! value of the caller's own type.
//!
//! # Overview
//!
//! A PEG describes a language as an ordered set of rules built from ten primitives:
//! literals and regex-backed classes at the leaves, sequencing and ordered choice for
//! composition, the two zero-width lookaheads (`&`/`!`), and the three repetition shapes
//! (`?`/`*`/`+`). Unlike a context-free grammar, a PEG has no ambiguity: ordered choice
//! always commits to its first successful alternative, so a given input has at most one
//! parse. This library compiles grammar source written in that same textual PEG syntax —
//! the library is self-describing, since the PEG-parsing grammar ([`meta_grammar`]) is
//! itself built from the [`matcher`] primitives it produces for user grammars.
//!
//! # Design
//!
//! Rather than expose the matcher primitives as a small set of implementor traits to be
//! composed by hand in Rust (the approach `lang-pt`, the library this one grew out of,
//! takes with `Concat`/`Union`-style production utilities), every matcher here is one
//! variant of a single closed [`MatcherKind`](matcher::MatcherKind) enum dispatched
//! through one `match`. There is no host extension point for a new matcher kind, so the
//! closed representation costs nothing and keeps the graph plain data: a [`Matcher`] is
//! just an `Rc` handle with interior-mutable children, safe to build, resolve and share
//! without a trait object in sight.
//!
//! [`Grammar::new`] compiles PEG source text into a resolved matcher graph; [`Grammar::parse`]
//! runs that graph against input and returns a [`Node`] parse tree. [`Language`] layers
//! semantic actions on top of a compiled grammar so each rule can fold its matched text and
//! its children's already-evaluated values into a value of the embedder's own type, without
//! ever touching the parse tree directly.
//!
//! # Example
//!
//! ```
//! use peg_pt::{Grammar, Language};
//!
//! let grammar = Grammar::new(
//!     "expr <- num (add)*\n\
//!      add  <- '+' num\n\
//!      num  <- [0-9]+\n",
//! )
//! .unwrap();
//!
//! let mut language: Language<i64> = Language::new(grammar);
//! language.rule_with_raw("num", |text| text.parse().unwrap());
//! language.rule_with_folded("add", |_node, children| children[0]);
//! language.rule("expr", |_text, children| children.into_iter().sum());
//!
//! assert_eq!(language.eval("1+2+3").unwrap(), 6);
//! ```
//!
//! # License
//! [peg-pt](crate) is provided under the MIT license. See [LICENSE](https://github.com/creative-forest/peg-pt/blob/main/LICENSE).

mod error;
mod generator;
mod grammar;
mod language;
pub mod logger;
pub mod matcher;
mod meta_grammar;
mod node;
mod resolver;

pub use error::{ActionError, EvalError, GrammarError, ResolveError, SyntaxError};
pub use grammar::Grammar;
pub use language::{EvalInput, Language};
pub use matcher::{Matcher, MatcherKind};
pub use node::Node;
pub use resolver::ReferenceResolver;

/// Round-trip and idempotence properties (§8) that span the whole setup pipeline
/// (meta-grammar → generator → resolver) rather than any one module in isolation.
#[cfg(test)]
mod bootstrap_tests {
    use crate::generator;
    use crate::meta_grammar;
    use crate::resolver::ReferenceResolver;

    // A self-description of the meta-grammar's own operators (§4.2), written in the exact
    // textual notation it defines, minus the `literal` primitive — the sample this test
    // feeds the compiled result never needs a quoted string token, so there is nothing to
    // gain from reproducing the quote-alternation trick here too.
    const PEG_OF_PEG: &str = "\
grammar     <- spacing definition+\n\
definition  <- identifier left_arrow expression\n\
expression  <- sequence (slash sequence)*\n\
sequence    <- prefix*\n\
prefix      <- (and_op / not_op)? suffix\n\
suffix      <- primary (question / star / plus)?\n\
primary     <- identifier !left_arrow / open expression close / class / dot\n\
identifier  <- [A-Za-z_][A-Za-z0-9_]* spacing\n\
class       <- '[' [^\\]]* ']' spacing\n\
dot         <- '.' spacing\n\
and_op      <- '&' spacing\n\
not_op      <- '!' spacing\n\
slash       <- '/' spacing\n\
left_arrow  <- '<-' spacing\n\
question    <- '?' spacing\n\
star        <- '*' spacing\n\
plus        <- '+' spacing\n\
open        <- '(' spacing\n\
close       <- ')' spacing\n\
spacing     <- [ \\t\\r\\n]*\n\
";

    /// The engine is self-describing: its own meta-grammar can be spelled out as PEG
    /// source and compiled through the exact same pipeline ordinary user grammars go
    /// through, and the resulting grammar accepts (a simplified dialect of) the same PEG
    /// notation the hand-built meta-grammar accepts.
    #[test]
    fn the_meta_grammar_can_be_bootstrapped_from_its_own_textual_form() {
        let compiled = crate::Grammar::new(PEG_OF_PEG).unwrap();
        let sample = "num <- [0-9]+\n";
        let compiled_node = compiled.parse(sample).unwrap();
        let hand_built_node = meta_grammar::entry().match_text(sample).unwrap();
        assert_eq!(compiled_node.text, hand_built_node.text);
        assert_eq!(compiled_node.text, sample);
    }

    /// Running the generator twice on the same grammar-source parse tree must produce
    /// matcher graphs that are behaviorally equivalent (same accept/reject behavior and
    /// same captured structure), even though they are distinct `Rc` allocations.
    #[test]
    fn generating_twice_from_the_same_parse_tree_yields_equivalent_matchers() {
        let source = "expr <- num ('+' num)*\nnum <- [0-9]+\n";
        let tree = meta_grammar::entry().match_text(source).unwrap();

        let rules_a = generator::generate(&tree).unwrap();
        let rules_b = generator::generate(&tree).unwrap();

        let entry_a = ReferenceResolver::resolve_rules(&rules_a).unwrap();
        let entry_b = ReferenceResolver::resolve_rules(&rules_b).unwrap();

        for input in ["1+2+3", "42", "1+", "abc"] {
            let result_a = entry_a.match_text(input).map(|n| n.text);
            let result_b = entry_b.match_text(input).map(|n| n.text);
            assert_eq!(result_a, result_b, "divergence on input {:?}", input);
        }
    }

    /// Resolving an already-resolved graph must be a no-op: every `Reference` is already
    /// gone, so the second pass should walk the graph and hand back matchers with the same
    /// behavior (no rule lookups are needed, since none of the remaining nodes are
    /// `Reference`s).
    #[test]
    fn resolving_an_already_resolved_graph_is_a_no_op() {
        let source = "list <- item (',' item)*\nitem <- [a-z]+\n";
        let tree = meta_grammar::entry().match_text(source).unwrap();
        let rules = generator::generate(&tree).unwrap();

        let once = ReferenceResolver::resolve_rules(&rules).unwrap();
        // Re-resolving against an empty registry succeeds because no `Reference` remains
        // reachable from `once` — exactly the invariant §4.4/§8 require.
        let twice = ReferenceResolver::new(&[]).resolve(&once).unwrap();

        let node = twice.match_text("ab,cd,ef").unwrap();
        assert_eq!(node.text, "ab,cd,ef");
    }
}
