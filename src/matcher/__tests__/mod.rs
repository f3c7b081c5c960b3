//! Universal invariants over the matcher algebra (§8): properties that must hold for
//! every matcher/text pair, independent of which concrete grammar produced the matcher.

use crate::matcher::Matcher;

fn assert_prefix_invariant(text: &str, result: &Option<crate::node::Node>) {
    if let Some(node) = result {
        assert!(
            text.starts_with(&node.text),
            "matched text {:?} is not a prefix of input {:?}",
            node.text,
            text
        );
        assert!(node.text.len() <= text.len());
    }
}

#[test]
fn matched_text_is_always_a_prefix_of_the_input() {
    let cases: Vec<(std::rc::Rc<Matcher>, &str)> = vec![
        (Matcher::literal("ab"), "abcdef"),
        (Matcher::literal("ab"), "xy"),
        (Matcher::regex("[a-z]+").unwrap(), "abc123"),
        (
            Matcher::sequence(vec![Matcher::literal("a"), Matcher::literal("b")]),
            "abc",
        ),
        (
            Matcher::choice(vec![Matcher::literal("x"), Matcher::literal("a")]),
            "abc",
        ),
        (Matcher::one_or_more(Matcher::literal("a")), "aaab"),
        (Matcher::zero_or_more(Matcher::literal("a")), "bbb"),
        (Matcher::optional(Matcher::literal("a")), "bbb"),
        (Matcher::not(Matcher::literal("x")), "abc"),
        (Matcher::and(Matcher::literal("a")), "abc"),
    ];

    for (matcher, text) in cases {
        let result = matcher.match_text(text);
        assert_prefix_invariant(text, &result);
    }
}

#[test]
fn named_matcher_labels_every_node_it_produces() {
    let m = Matcher::literal("abc").named("greeting");
    let node = m.match_text("abc").unwrap();
    assert_eq!(node.name.as_deref(), Some("greeting"));
}

#[test]
fn or_node_wraps_exactly_the_winning_alternative() {
    let m = Matcher::choice(vec![Matcher::literal("x"), Matcher::literal("a")]).named("alt");
    let node = m.match_text("abc").unwrap();
    assert_eq!(node.name.as_deref(), Some("alt"));
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].text, "a");
}
