//! Matching for the two terminal matcher kinds: [`Literal`](super::MatcherKind::Literal) and
//! [`Regex`](super::MatcherKind::Regex).

use super::Matcher;
use crate::node::Node;
use regex::Regex;

pub(super) fn match_literal(matcher: &Matcher, value: &str, text: &str) -> Option<Node> {
    if text.starts_with(value) {
        Some(matcher.wrap(value, Vec::with_capacity(0)))
    } else {
        None
    }
}

pub(super) fn match_regex(matcher: &Matcher, regexp: &Regex, text: &str) -> Option<Node> {
    let found = regexp.find(text)?;
    debug_assert_eq!(found.start(), 0, "regex matcher must anchor at position 0");
    Some(matcher.wrap(found.as_str(), Vec::with_capacity(0)))
}
