//! Matching for the two zero-width assertions: [`Not`](super::MatcherKind::Not) (negative
//! lookahead) and [`And`](super::MatcherKind::And) (positive lookahead). Neither ever
//! consumes input.

use super::Matcher;
use crate::node::Node;

pub(super) fn match_not(matcher: &Matcher, text: &str) -> Option<Node> {
    let child = matcher
        .children()
        .first()
        .cloned()
        .expect("Not matcher must carry exactly one child");
    match child.match_text(text) {
        Some(_) => None,
        None => Some(matcher.wrap("", Vec::with_capacity(0))),
    }
}

pub(super) fn match_and(matcher: &Matcher, text: &str) -> Option<Node> {
    let child = matcher
        .children()
        .first()
        .cloned()
        .expect("And matcher must carry exactly one child");
    match child.match_text(text) {
        Some(_) => Some(matcher.wrap("", Vec::with_capacity(0))),
        None => None,
    }
}
