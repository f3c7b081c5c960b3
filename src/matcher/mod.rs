//! The matcher algebra: the closed set of parsing-expression kinds and their matching semantics.
//!
//! A [`Matcher`] is a tagged variant (see [`MatcherKind`]) over the ten primitives a PEG
//! needs: literals, regex-backed character classes, sequencing, ordered choice, the two
//! zero-width lookaheads, and the three repetition shapes. This mirrors the teacher
//! crate's production utilities (`Concat`, `Union`, `RegexField`, ...) but, per the design
//! note in the port's specification, collapses them into one closed `enum` behind a single
//! `match` dispatch rather than an open `Rc<dyn Trait>` hierarchy — there is no host
//! extension point for new matcher kinds in this engine.

mod lookahead;
mod repeat;
mod sequence;
mod terminal;

use crate::error::GrammarError;
use crate::logger;
use crate::node::Node;
use regex::Regex;
use std::cell::{Ref, RefCell};
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

/// The closed set of parsing-expression kinds a [`Matcher`] can be.
pub enum MatcherKind {
    /// Matches iff the input starts with the given literal string.
    Literal(String),
    /// Matches the given pattern anchored at the start of the input.
    Regex(Regex),
    /// Matches each child in order; fails on the first child that fails.
    Sequence,
    /// Tries each child left to right; succeeds on the first success.
    Or,
    /// Negative lookahead: succeeds (consuming nothing) iff the single child fails.
    Not,
    /// Positive lookahead: succeeds (consuming nothing) iff the single child succeeds.
    And,
    /// Repeats the single child one or more times.
    OneOrMore,
    /// Repeats the single child zero or more times.
    ZeroOrMore,
    /// Matches the single child zero or one times.
    Optional,
    /// A placeholder naming another rule; eliminated by the resolver (§4.4).
    Reference(String),
}

/// One node of the matcher graph.
///
/// Every matcher carries an ordered (possibly empty) list of child matchers and an
/// optional rule label. Both `children` and `name` are interior-mutable: the generator and
/// resolver populate them during construction/resolution (§4.4), after which the graph is
/// read-only and safely shared (`Rc`) across however many times it is walked.
pub struct Matcher {
    kind: MatcherKind,
    name: RefCell<Option<Rc<str>>>,
    children: RefCell<Vec<Rc<Matcher>>>,
}

impl Matcher {
    fn leaf(kind: MatcherKind) -> Rc<Matcher> {
        Rc::new(Matcher {
            kind,
            name: RefCell::new(None),
            children: RefCell::new(Vec::new()),
        })
    }

    fn with_children(kind: MatcherKind, children: Vec<Rc<Matcher>>) -> Rc<Matcher> {
        Rc::new(Matcher {
            kind,
            name: RefCell::new(None),
            children: RefCell::new(children),
        })
    }

    /// A matcher that succeeds iff the input starts with `value`, consuming it.
    pub fn literal(value: impl Into<String>) -> Rc<Matcher> {
        Self::leaf(MatcherKind::Literal(value.into()))
    }

    /// A matcher that anchors `pattern` at the start of the input and consumes the match.
    ///
    /// The pattern is forwarded verbatim to the `regex` crate (the host regex engine, per
    /// the Open Question resolution in the specification) and implicitly anchored; it must
    /// not itself search ahead.
    pub fn regex(pattern: &str) -> Result<Rc<Matcher>, GrammarError> {
        let anchored = format!("^(?:{})", pattern);
        let regexp = Regex::new(&anchored).map_err(|err| {
            GrammarError::new(format!("invalid regular expression /{}/: {}", pattern, err))
        })?;
        Ok(Self::leaf(MatcherKind::Regex(regexp)))
    }

    /// Matches each child against the remaining text in order.
    pub fn sequence(children: Vec<Rc<Matcher>>) -> Rc<Matcher> {
        Self::with_children(MatcherKind::Sequence, children)
    }

    /// Tries each child left to right, committing to the first success (ordered choice).
    pub fn choice(children: Vec<Rc<Matcher>>) -> Rc<Matcher> {
        Self::with_children(MatcherKind::Or, children)
    }

    /// Negative lookahead over `child`.
    pub fn not(child: Rc<Matcher>) -> Rc<Matcher> {
        Self::with_children(MatcherKind::Not, vec![child])
    }

    /// Positive lookahead over `child`.
    pub fn and(child: Rc<Matcher>) -> Rc<Matcher> {
        Self::with_children(MatcherKind::And, vec![child])
    }

    /// One-or-more repetition of `child`.
    pub fn one_or_more(child: Rc<Matcher>) -> Rc<Matcher> {
        Self::with_children(MatcherKind::OneOrMore, vec![child])
    }

    /// Zero-or-more repetition of `child`.
    pub fn zero_or_more(child: Rc<Matcher>) -> Rc<Matcher> {
        Self::with_children(MatcherKind::ZeroOrMore, vec![child])
    }

    /// Zero-or-one repetition of `child`.
    pub fn optional(child: Rc<Matcher>) -> Rc<Matcher> {
        Self::with_children(MatcherKind::Optional, vec![child])
    }

    /// A placeholder standing in for the rule named `name`, to be eliminated by resolution.
    pub fn reference(name: impl Into<String>) -> Rc<Matcher> {
        Self::leaf(MatcherKind::Reference(name.into()))
    }

    /// Attach a rule label to this matcher (builder-style; returns the same `Rc`).
    ///
    /// Every non-`Reference` matcher with a name `N` must produce `Node`s whose `name ==
    /// Some(N)`; naming is part of construction and is not expected to change afterwards.
    pub fn named(self: &Rc<Self>, name: impl Into<Rc<str>>) -> Rc<Matcher> {
        *self.name.borrow_mut() = Some(name.into());
        self.clone()
    }

    /// The rule label this matcher is tagged with, if any.
    pub fn name(&self) -> Option<Rc<str>> {
        self.name.borrow().clone()
    }

    /// The matcher's variant and variant-specific payload.
    pub fn kind(&self) -> &MatcherKind {
        &self.kind
    }

    pub(crate) fn children(&self) -> Ref<'_, Vec<Rc<Matcher>>> {
        self.children.borrow()
    }

    /// Detach this matcher's current child list, leaving it empty. Used by the resolver's
    /// detach/reattach rewrite (§4.4) to keep cyclic graphs from recursing forever.
    pub(crate) fn take_children(&self) -> Vec<Rc<Matcher>> {
        self.children.replace(Vec::new())
    }

    pub(crate) fn set_children(&self, children: Vec<Rc<Matcher>>) {
        *self.children.borrow_mut() = children;
    }

    fn wrap(&self, text: &str, children: Vec<Node>) -> Node {
        Node::new(text, self.name(), children)
    }

    /// Attempt to match a prefix of `text`. Returns `None` on failure; never panics, even on
    /// grammars or input that cannot possibly succeed.
    pub fn match_text(&self, text: &str) -> Option<Node> {
        let label = self.label();
        logger::log_entry(&label, text);
        let result = match &self.kind {
            MatcherKind::Literal(value) => terminal::match_literal(self, value, text),
            MatcherKind::Regex(regexp) => terminal::match_regex(self, regexp, text),
            MatcherKind::Sequence => sequence::match_sequence(self, text),
            MatcherKind::Or => sequence::match_or(self, text),
            MatcherKind::Not => lookahead::match_not(self, text),
            MatcherKind::And => lookahead::match_and(self, text),
            MatcherKind::OneOrMore => repeat::match_repeat(self, text, 1, None),
            MatcherKind::ZeroOrMore => repeat::match_repeat(self, text, 0, None),
            MatcherKind::Optional => repeat::match_repeat(self, text, 0, Some(1)),
            // A `Reference` reachable at match time means resolution was skipped or
            // incomplete; this is a programmer error in the embedding, not an input error,
            // so it fails the match rather than panicking on untrusted input.
            MatcherKind::Reference(_) => None,
        };
        match &result {
            Some(node) => logger::log_success(&label, &node.text),
            None => logger::log_failure(&label, text),
        }
        result
    }

    fn label(&self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => self.to_string(),
        }
    }
}

impl Display for Matcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MatcherKind::Literal(value) => write!(f, "{:?}", value),
            MatcherKind::Regex(regexp) => write!(f, "/{}/", regexp.as_str()),
            MatcherKind::Sequence => write!(f, "<sequence>"),
            MatcherKind::Or => write!(f, "<or>"),
            MatcherKind::Not => write!(f, "!<lookahead>"),
            MatcherKind::And => write!(f, "&<lookahead>"),
            MatcherKind::OneOrMore => write!(f, "<one-or-more>"),
            MatcherKind::ZeroOrMore => write!(f, "<zero-or-more>"),
            MatcherKind::Optional => write!(f, "<optional>"),
            MatcherKind::Reference(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod __tests__;
