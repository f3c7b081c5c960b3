//! Matching for [`Sequence`](super::MatcherKind::Sequence) and [`Or`](super::MatcherKind::Or)
//! (ordered choice).

use super::Matcher;
use crate::node::Node;

pub(super) fn match_sequence(matcher: &Matcher, text: &str) -> Option<Node> {
    let mut consumed = 0usize;
    let mut children = Vec::new();
    for child in matcher.children().iter() {
        let node = child.match_text(&text[consumed..])?;
        consumed += node.len();
        children.push(node);
    }
    Some(matcher.wrap(&text[..consumed], children))
}

pub(super) fn match_or(matcher: &Matcher, text: &str) -> Option<Node> {
    for child in matcher.children().iter() {
        if let Some(node) = child.match_text(text) {
            let consumed = node.len();
            return Some(matcher.wrap(&text[..consumed], vec![node]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::matcher::Matcher;

    #[test]
    fn sequence_consumes_concatenation() {
        let m = Matcher::sequence(vec![Matcher::literal("a"), Matcher::literal("b")]);
        let node = m.match_text("abc").unwrap();
        assert_eq!(node.text, "ab");
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn sequence_fails_on_first_child_failure_without_backtracking() {
        let m = Matcher::sequence(vec![Matcher::literal("a"), Matcher::literal("c")]);
        assert!(m.match_text("abc").is_none());
    }

    #[test]
    fn or_commits_to_first_success() {
        let m = Matcher::choice(vec![Matcher::literal("b"), Matcher::literal("a")]);
        let node = m.match_text("ac").unwrap();
        assert_eq!(node.text, "a");
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn or_fails_when_all_children_fail() {
        let m = Matcher::choice(vec![Matcher::literal("b"), Matcher::literal("c")]);
        assert!(m.match_text("a").is_none());
    }
}
