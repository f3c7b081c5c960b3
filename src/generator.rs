//! Turns a parsed grammar-source tree (matched against
//! [`meta_grammar::entry`](crate::meta_grammar::entry)) into the unresolved
//! `Vec<(String, Rc<Matcher>)>` rule list a
//! [`ReferenceResolver`](crate::resolver::ReferenceResolver) can then wire up (§4.3).
//!
//! The host language this port is translated from dispatches on parse-tree node names with
//! a single reflective visitor whose handlers can return a string, a matcher, or a list of
//! matchers depending on which rule fired. Rust has no such dynamically-typed return; the
//! three shapes are folded into one closed [`Folded`] enum instead, and each handler below
//! matches on it explicitly rather than trusting an implicit cast — a direct resolution of
//! the Open Question the specification raises about visitor return typing.

use crate::error::GrammarError;
use crate::matcher::{Matcher, MatcherKind};
use crate::node::Node;
use std::rc::Rc;

/// The value produced while folding one grammar-source parse node, generalizing the
/// host's untyped visitor return value into a closed set Rust can match on.
enum Folded {
    /// An identifier's name, or a single-character operator tag (`"?"`, `"*"`, `"+"`,
    /// `"&"`, `"!"`, or `""` for "no operator present").
    Text(String),
    /// A single matcher — the fold of `literal`, `class`, `dot`, `expression`, `suffix`, ...
    One(Rc<Matcher>),
    /// A matcher per repeated sibling — the fold of `expression__zeroormore`'s alternatives.
    Many(Vec<Rc<Matcher>>),
}

impl Folded {
    fn into_one(self) -> Rc<Matcher> {
        match self {
            Folded::One(matcher) => matcher,
            _ => unreachable!("handler contract violated: expected a single matcher"),
        }
    }

    fn into_text(self) -> String {
        match self {
            Folded::Text(text) => text,
            _ => unreachable!("handler contract violated: expected text"),
        }
    }

    fn into_many(self) -> Vec<Rc<Matcher>> {
        match self {
            Folded::Many(matchers) => matchers,
            _ => unreachable!("handler contract violated: expected a matcher list"),
        }
    }
}

fn find_child<'a>(node: &'a Node, name: &str) -> Option<&'a Node> {
    node.children.iter().find(|child| child.name.as_deref() == Some(name))
}

fn require_child<'a>(node: &'a Node, name: &str) -> &'a Node {
    find_child(node, name).unwrap_or_else(|| panic!("{} node missing its {} child", node.text, name))
}

/// Strip the surrounding quotes from a matched `literal` token and resolve its escapes
/// (`\n`, `\t`, `\r`, `\\`, and the matching quote). Any other escaped character is a
/// grammar syntax error rather than standing in for itself.
fn unescape_literal(raw: &str) -> Result<String, GrammarError> {
    let quote = raw.chars().next().expect("literal token is never empty");
    let body = &raw[quote.len_utf8()..raw.len() - quote.len_utf8()];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(q) if q == quote => out.push(q),
            Some(other) => {
                return Err(GrammarError::new(format!(
                    "unsupported escape sequence \\{} in literal",
                    other
                )))
            }
            None => {}
        }
    }
    Ok(out)
}

/// Dissolve entirely once resolved, so a rule whose body is a bare identifier (`a <- b`)
/// would otherwise lose its own name when the reference beneath it is replaced. Wrapping
/// it in a transparent single-child sequence gives the label something that survives
/// resolution to attach to.
fn label_definition(matcher: Rc<Matcher>, name: Rc<str>) -> Rc<Matcher> {
    if matches!(matcher.kind(), MatcherKind::Reference(_)) {
        Matcher::sequence(vec![matcher]).named(name)
    } else {
        matcher.named(name)
    }
}

fn fold(node: &Node, rules: &mut Vec<(String, Rc<Matcher>)>) -> Result<Folded, GrammarError> {
    match node.name.as_deref() {
        Some("identifier") => {
            let name = require_child(node, "identifier__regex").text.clone();
            Ok(Folded::Text(name))
        }

        Some("literal") => {
            let raw = &node.children[0].text;
            Ok(Folded::One(Matcher::literal(unescape_literal(raw)?)))
        }

        Some("class") => {
            let pattern = &node.children[0].text;
            let matcher = Matcher::regex(pattern).map_err(|_| {
                GrammarError::new(format!("invalid character class {}", pattern))
            })?;
            Ok(Folded::One(matcher))
        }

        Some("dot") => Ok(Folded::One(
            Matcher::regex("(?s).").expect("dot pattern is valid"),
        )),

        Some("primary__sequence") => {
            let identifier = fold(require_child(node, "identifier"), rules)?.into_text();
            Ok(Folded::One(Matcher::reference(identifier)))
        }

        Some("primary__parens") => fold(require_child(node, "expression"), rules),

        Some("primary") => fold(&node.children[0], rules),

        Some("suffix__optional") => Ok(Folded::Text(operator_tag(node))),

        Some("suffix") => {
            let primary = fold(&node.children[0], rules)?.into_one();
            let op = fold(&node.children[1], rules)?.into_text();
            Ok(Folded::One(match op.as_str() {
                "?" => Matcher::optional(primary),
                "*" => Matcher::zero_or_more(primary),
                "+" => Matcher::one_or_more(primary),
                _ => primary,
            }))
        }

        Some("prefix__optional") => Ok(Folded::Text(operator_tag(node))),

        Some("prefix") => {
            let op = fold(&node.children[0], rules)?.into_text();
            let suffix = fold(&node.children[1], rules)?.into_one();
            Ok(Folded::One(match op.as_str() {
                "&" => Matcher::and(suffix),
                "!" => Matcher::not(suffix),
                _ => suffix,
            }))
        }

        Some("sequence") => {
            let mut terms = Vec::with_capacity(node.children.len());
            for child in &node.children {
                terms.push(fold(child, rules)?.into_one());
            }
            Ok(Folded::One(match terms.len() {
                0 => Matcher::sequence(Vec::with_capacity(0)),
                1 => terms.into_iter().next().unwrap(),
                _ => Matcher::sequence(terms),
            }))
        }

        Some("expression__sequence") => fold(require_child(node, "sequence"), rules),

        Some("expression__zeroormore") => {
            let mut alternatives = Vec::with_capacity(node.children.len());
            for child in &node.children {
                alternatives.push(fold(child, rules)?.into_one());
            }
            Ok(Folded::Many(alternatives))
        }

        Some("expression") => {
            let first = fold(&node.children[0], rules)?.into_one();
            let rest = fold(&node.children[1], rules)?.into_many();
            Ok(Folded::One(if rest.is_empty() {
                first
            } else {
                let mut alternatives = Vec::with_capacity(rest.len() + 1);
                alternatives.push(first);
                alternatives.extend(rest);
                Matcher::choice(alternatives)
            }))
        }

        Some("definition") => {
            let name = fold(require_child(node, "identifier"), rules)?.into_text();
            let body = fold(require_child(node, "expression"), rules)?.into_one();
            let matcher = label_definition(body, Rc::from(name.as_str()));
            rules.push((name, matcher.clone()));
            Ok(Folded::One(matcher))
        }

        Some("grammar__oneormore") => {
            for child in &node.children {
                fold(child, rules)?;
            }
            Ok(Folded::Text(String::new()))
        }

        Some("grammar") => {
            fold(require_child(node, "grammar__oneormore"), rules)?;
            Ok(Folded::Text(String::new()))
        }

        other => unreachable!(
            "generator encountered an unexpected node name: {:?}",
            other
        ),
    }
}

/// `?`/`*`/`+`/`&`/`!` if the optional operator matched, `""` otherwise. These nodes are
/// either empty (no operator) or wrap a single child whose text is the operator token
/// plus the spacing that follows it, so the first character is all that is needed.
fn operator_tag(node: &Node) -> String {
    match node.text.chars().next() {
        Some(c) => c.to_string(),
        None => String::new(),
    }
}

/// Generate the unresolved rule list for a grammar-source tree matched against
/// [`meta_grammar::entry`](crate::meta_grammar::entry).
pub fn generate(tree: &Node) -> Result<Vec<(String, Rc<Matcher>)>, GrammarError> {
    let mut rules = Vec::new();
    fold(tree, &mut rules)?;
    Ok(rules)
}
