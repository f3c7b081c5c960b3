//! Matching for the three repetition kinds: [`OneOrMore`](super::MatcherKind::OneOrMore),
//! [`ZeroOrMore`](super::MatcherKind::ZeroOrMore) and [`Optional`](super::MatcherKind::Optional).
//! All three share one loop parameterized by an inclusive `[min, max]` repetition bound
//! (`max = None` meaning unbounded), matching `lang-pt`'s `List::consume` loop: repeat the
//! child, stopping on failure or on an empty-consuming success, then check the count
//! against the bound.

use super::Matcher;
use crate::node::Node;

pub(super) fn match_repeat(matcher: &Matcher, text: &str, min: usize, max: Option<usize>) -> Option<Node> {
    let child = matcher
        .children()
        .first()
        .cloned()
        .expect("repetition matcher must carry exactly one child");

    let mut consumed = 0usize;
    let mut children = Vec::new();
    loop {
        if let Some(max) = max {
            if children.len() >= max {
                break;
            }
        }
        match child.match_text(&text[consumed..]) {
            Some(node) => {
                let node_len = node.len();
                let was_empty = node_len == 0;
                children.push(node);
                consumed += node_len;
                // Guard against looping forever on a child that matches without consuming.
                if was_empty {
                    break;
                }
            }
            None => break,
        }
    }

    if children.len() >= min {
        Some(matcher.wrap(&text[..consumed], children))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::matcher::Matcher;

    #[test]
    fn one_or_more_requires_at_least_one() {
        let m = Matcher::one_or_more(Matcher::literal("a"));
        assert!(m.match_text("").is_none());
        assert!(m.match_text("b").is_none());
        let node = m.match_text("aaab").unwrap();
        assert_eq!(node.text, "aaa");
        assert_eq!(node.children.len(), 3);
    }

    #[test]
    fn zero_or_more_accepts_empty_input() {
        let m = Matcher::zero_or_more(Matcher::literal("a"));
        let node = m.match_text("").unwrap();
        assert_eq!(node.text, "");
        assert_eq!(node.children.len(), 0);
    }

    #[test]
    fn optional_matches_at_most_once() {
        let m = Matcher::optional(Matcher::literal("a"));
        let node = m.match_text("aaa").unwrap();
        assert_eq!(node.text, "a");
        assert_eq!(node.children.len(), 1);

        let node = m.match_text("b").unwrap();
        assert_eq!(node.text, "");
        assert_eq!(node.children.len(), 0);
    }

    #[test]
    fn repetition_terminates_on_empty_inner_match() {
        // A child that can match empty text must not loop forever.
        let m = Matcher::zero_or_more(Matcher::regex("a*").unwrap());
        let node = m.match_text("aaab").unwrap();
        assert_eq!(node.text, "aaa");
        // The inner regex greedily consumes "aaa" on the first iteration, then matches
        // empty against "b" and the loop stops.
        assert_eq!(node.children.len(), 2);
    }
}
