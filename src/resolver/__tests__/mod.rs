use crate::matcher::{Matcher, MatcherKind};
use crate::resolver::ReferenceResolver;
use std::rc::Rc;

#[test]
fn resolves_a_simple_chain() {
    let digit = Matcher::regex("[0-9]").unwrap().named("digit");
    let number = Matcher::one_or_more(Matcher::reference("digit")).named("number");
    let rules = vec![
        ("number".to_string(), number.clone()),
        ("digit".to_string(), digit),
    ];

    let resolved = ReferenceResolver::new(&rules).resolve(&number).unwrap();
    let node = resolved.match_text("42a").unwrap();
    assert_eq!(node.text, "42");
    assert_eq!(node.name.as_deref(), Some("number"));
}

#[test]
fn resolves_direct_self_recursion() {
    // parens <- "(" parens? ")"
    let parens = Matcher::sequence(vec![
        Matcher::literal("("),
        Matcher::optional(Matcher::reference("parens")),
        Matcher::literal(")"),
    ])
    .named("parens");
    let rules = vec![("parens".to_string(), parens.clone())];

    let resolved = ReferenceResolver::new(&rules).resolve(&parens).unwrap();
    assert!(resolved.match_text("(())").is_some());
    assert_eq!(resolved.match_text("(())").unwrap().text, "(())");
    assert!(resolved.match_text("(()").unwrap().len() == 2);
}

#[test]
fn resolves_mutual_recursion() {
    // a <- "x" b?
    // b <- "y" a?
    let a = Matcher::sequence(vec![
        Matcher::literal("x"),
        Matcher::optional(Matcher::reference("b")),
    ])
    .named("a");
    let b = Matcher::sequence(vec![
        Matcher::literal("y"),
        Matcher::optional(Matcher::reference("a")),
    ])
    .named("b");
    let rules = vec![("a".to_string(), a.clone()), ("b".to_string(), b)];

    let resolved = ReferenceResolver::new(&rules).resolve(&a).unwrap();
    let node = resolved.match_text("xyxz").unwrap();
    assert_eq!(node.text, "xyx");
}

#[test]
fn unknown_reference_is_an_error() {
    let root = Matcher::reference("missing");
    let rules = vec![("root".to_string(), root.clone())];
    let err = ReferenceResolver::new(&rules).resolve(&root).unwrap_err();
    assert_eq!(err.rule_name, "missing");
}

#[test]
fn shared_subexpression_is_resolved_once_and_reused() {
    let spacing = Matcher::zero_or_more(Matcher::literal(" ")).named("spacing");
    let word_a = Matcher::sequence(vec![Matcher::literal("a"), Matcher::reference("spacing")]);
    let word_b = Matcher::sequence(vec![Matcher::literal("b"), Matcher::reference("spacing")]);
    let root = Matcher::sequence(vec![word_a, word_b]).named("root");
    let rules = vec![
        ("root".to_string(), root.clone()),
        ("spacing".to_string(), spacing),
    ];

    let resolved = ReferenceResolver::new(&rules).resolve(&root).unwrap();
    let node = resolved.match_text("a b ").unwrap();
    assert_eq!(node.text, "a b ");

    // No Reference survives anywhere in the resolved graph.
    fn assert_no_reference(matcher: &Rc<Matcher>, seen: &mut Vec<*const Matcher>) {
        let ptr = Rc::as_ptr(matcher);
        if seen.contains(&ptr) {
            return;
        }
        seen.push(ptr);
        assert!(!matches!(matcher.kind(), MatcherKind::Reference(_)));
        for child in matcher.children().iter() {
            assert_no_reference(child, seen);
        }
    }
    assert_no_reference(&resolved, &mut Vec::new());
}
