//! The grammar that parses grammars (§4.2): a hand-built matcher graph for the textual PEG
//! syntax itself, resolved through the very same [`ReferenceResolver`] the
//! [`GrammarGenerator`](crate::generator) uses for user grammars. The engine is
//! self-describing in this sense — there is no separate bootstrap mechanism, only one
//! more matcher graph built from the same ten primitives and wired up the same way.
//!
//! Loosely the classic PEG-for-PEG grammar (Ford, *Parsing Expression Grammars*), trimmed
//! to what §4.2/§4.3 actually need: rules the [`GrammarGenerator`] dispatches on are given
//! a stable name (`identifier`, `literal`, `class`, `dot`, `definition`, `expression`,
//! `primary`, ..., plus the `__`-suffixed helper rules that disambiguate an alternative or
//! a repeated group); purely structural glue (`spacing`, the operator tokens) stays
//! unnamed since nothing downstream dispatches on it.

use crate::matcher::Matcher;
use crate::resolver::ReferenceResolver;
use once_cell::unsync::OnceCell;
use std::rc::Rc;

const IDENT_PATTERN: &str = "[A-Za-z_][A-Za-z0-9_]*";
const LITERAL_PATTERN: &str = r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#;
const CLASS_PATTERN: &str = r"\[(?:[^\]\\]|\\.)*\]";
// A `#` comment must run to a line terminator — or end-of-input, which stands in for the
// line terminator `end_of_line` itself doesn't list, so a grammar source whose last line
// is a comment with no trailing newline still tokenizes (Ford's PEG-for-PEG convention).
const SPACING_PATTERN: &str = r"(?:[ \t\r\n]|#[^\n\r]*(?:\r\n|\n|\r|$))*";

thread_local! {
    static META: OnceCell<Rc<Matcher>> = OnceCell::new();
}

/// The resolved `grammar` rule: matches a complete PEG source text.
pub fn entry() -> Rc<Matcher> {
    META.with(|cell| cell.get_or_init(build).clone())
}

fn build() -> Rc<Matcher> {
    let spacing = Matcher::regex(SPACING_PATTERN).expect("spacing pattern is valid");

    let and = Matcher::sequence(vec![Matcher::literal("&"), spacing.clone()]);
    let not = Matcher::sequence(vec![Matcher::literal("!"), spacing.clone()]);
    let slash = Matcher::sequence(vec![Matcher::literal("/"), spacing.clone()]);
    let left_arrow = Matcher::sequence(vec![Matcher::literal("<-"), spacing.clone()]);
    let question = Matcher::sequence(vec![Matcher::literal("?"), spacing.clone()]);
    let star = Matcher::sequence(vec![Matcher::literal("*"), spacing.clone()]);
    let plus = Matcher::sequence(vec![Matcher::literal("+"), spacing.clone()]);
    let open = Matcher::sequence(vec![Matcher::literal("("), spacing.clone()]);
    let close = Matcher::sequence(vec![Matcher::literal(")"), spacing.clone()]);
    let end_of_file = Matcher::not(Matcher::regex("(?s).").expect("dot pattern is valid"));

    let identifier__regex = Matcher::regex(IDENT_PATTERN)
        .expect("identifier pattern is valid")
        .named("identifier__regex");
    let identifier = Matcher::sequence(vec![identifier__regex.clone(), spacing.clone()])
        .named("identifier");

    let literal = Matcher::sequence(vec![
        Matcher::regex(LITERAL_PATTERN).expect("literal pattern is valid"),
        spacing.clone(),
    ])
    .named("literal");
    let class = Matcher::sequence(vec![
        Matcher::regex(CLASS_PATTERN).expect("class pattern is valid"),
        spacing.clone(),
    ])
    .named("class");
    let dot = Matcher::sequence(vec![Matcher::literal("."), spacing.clone()]).named("dot");

    // `primary` is the one place the graph is genuinely cyclic: a parenthesized group
    // inside a primary can contain a whole expression again. Everything else below is
    // built from matchers already constructed, so this is the only forward reference
    // the resolver needs to eliminate.
    let primary__sequence =
        Matcher::sequence(vec![identifier.clone(), Matcher::not(left_arrow.clone())])
            .named("primary__sequence");
    let primary__parens = Matcher::sequence(vec![
        open.clone(),
        Matcher::reference("expression"),
        close.clone(),
    ])
    .named("primary__parens");
    let primary = Matcher::choice(vec![
        primary__sequence.clone(),
        primary__parens.clone(),
        literal.clone(),
        class.clone(),
        dot.clone(),
    ])
    .named("primary");

    let suffix__optional =
        Matcher::optional(Matcher::choice(vec![question, star, plus])).named("suffix__optional");
    let suffix = Matcher::sequence(vec![primary, suffix__optional]).named("suffix");

    let prefix__optional =
        Matcher::optional(Matcher::choice(vec![and, not])).named("prefix__optional");
    let prefix = Matcher::sequence(vec![prefix__optional, suffix]).named("prefix");

    let sequence = Matcher::zero_or_more(prefix).named("sequence");

    let expression__sequence =
        Matcher::sequence(vec![slash, sequence.clone()]).named("expression__sequence");
    let expression__zeroormore =
        Matcher::zero_or_more(expression__sequence.clone()).named("expression__zeroormore");
    let expression = Matcher::sequence(vec![sequence, expression__zeroormore.clone()])
        .named("expression");

    let definition =
        Matcher::sequence(vec![identifier.clone(), left_arrow, expression.clone()])
            .named("definition");
    let grammar__oneormore = Matcher::one_or_more(definition.clone()).named("grammar__oneormore");
    let grammar = Matcher::sequence(vec![spacing, grammar__oneormore.clone(), end_of_file])
        .named("grammar");

    let rules: Vec<(String, Rc<Matcher>)> = vec![
        ("grammar".to_string(), grammar.clone()),
        ("grammar__oneormore".to_string(), grammar__oneormore),
        ("definition".to_string(), definition),
        ("expression".to_string(), expression),
        ("expression__zeroormore".to_string(), expression__zeroormore),
        ("expression__sequence".to_string(), expression__sequence),
        ("primary".to_string(), primary),
        ("primary__sequence".to_string(), primary__sequence),
        ("primary__parens".to_string(), primary__parens),
        ("identifier".to_string(), identifier),
        ("identifier__regex".to_string(), identifier__regex),
        ("literal".to_string(), literal),
        ("class".to_string(), class),
        ("dot".to_string(), dot),
    ];

    ReferenceResolver::new(&rules)
        .resolve(&grammar)
        .expect("meta-grammar references only rules it defines")
}
