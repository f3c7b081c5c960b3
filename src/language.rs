//! Attaches semantic actions to a compiled [`Grammar`], turning a parse tree into a value
//! of the caller's own type (§4.6).
//!
//! The host language this is ported from registers a rule's action as one reflectively
//! inspected closure, dispatching on its arity at call time. Rust closures don't carry
//! that kind of runtime arity information, so the single reflective entry point is
//! replaced by three explicit ones — [`Language::rule`], [`Language::rule_with_raw`] and
//! [`Language::rule_with_folded`] — one per shape of action a rule might need.

use crate::error::{ActionError, EvalError};
use crate::grammar::Grammar;
use crate::node::Node;
use std::collections::HashMap;

/// What [`Language::eval`] accepts: either grammar source text to parse first, or a parse
/// tree the caller already built (e.g. by calling [`Grammar::parse`] directly and
/// caching/inspecting the tree before folding it).
pub enum EvalInput {
    Source(String),
    Node(Node),
}

impl From<&str> for EvalInput {
    fn from(source: &str) -> Self {
        EvalInput::Source(source.to_string())
    }
}

impl From<String> for EvalInput {
    fn from(source: String) -> Self {
        EvalInput::Source(source)
    }
}

impl From<Node> for EvalInput {
    fn from(node: Node) -> Self {
        EvalInput::Node(node)
    }
}

enum Action<TValue> {
    /// Receives only the text the rule matched.
    Raw(Box<dyn Fn(&str) -> TValue>),
    /// Receives the matched text plus the already-evaluated value of every descendant
    /// node that itself has a registered action (§4.6's default, bottom-up fold).
    Folded(Box<dyn Fn(&str, Vec<TValue>) -> TValue>),
    /// Receives the whole matched node (so the action can inspect which alternative of
    /// an `Or` fired, or walk named children directly) plus the same folded child values.
    NodeFolded(Box<dyn Fn(&Node, Vec<TValue>) -> TValue>),
}

/// A grammar paired with a registry of per-rule semantic actions.
///
/// Evaluation is a strict bottom-up post-order fold: a node's children are evaluated
/// before the node itself, and only nodes whose rule name has a registered action
/// contribute a value — unnamed structural nodes (and named rules nobody registered an
/// action for) are transparently skipped over, so their own children surface as if they
/// were direct children of the nearest registered ancestor.
pub struct Language<TValue> {
    grammar: Grammar,
    actions: HashMap<String, Action<TValue>>,
}

impl<TValue> Language<TValue> {
    /// Wrap a compiled grammar with an empty action registry.
    pub fn new(grammar: Grammar) -> Self {
        Language {
            grammar,
            actions: HashMap::new(),
        }
    }

    /// Register the default action shape: matched text in, folded child values in, one
    /// value out.
    pub fn rule(
        &mut self,
        name: &str,
        action: impl Fn(&str, Vec<TValue>) -> TValue + 'static,
    ) -> &mut Self {
        self.actions
            .insert(name.to_string(), Action::Folded(Box::new(action)));
        self
    }

    /// Register a leaf-style action that only ever needs the matched text (e.g. parsing a
    /// number literal), ignoring any children.
    pub fn rule_with_raw(
        &mut self,
        name: &str,
        action: impl Fn(&str) -> TValue + 'static,
    ) -> &mut Self {
        self.actions
            .insert(name.to_string(), Action::Raw(Box::new(action)));
        self
    }

    /// Register an action that additionally needs the node itself — typically to branch
    /// on which named child is present, when a rule's alternatives aren't all shaped the
    /// same way.
    pub fn rule_with_folded(
        &mut self,
        name: &str,
        action: impl Fn(&Node, Vec<TValue>) -> TValue + 'static,
    ) -> &mut Self {
        self.actions
            .insert(name.to_string(), Action::NodeFolded(Box::new(action)));
        self
    }

    /// Fold `input` into a `TValue`, starting from the root rule the grammar defines.
    ///
    /// `input` is either source text (parsed with the wrapped [`Grammar`] first) or a
    /// `Node` tree the caller already produced — handy when the same parse is folded more
    /// than once, or was built and inspected before deciding how to evaluate it.
    pub fn eval(&self, input: impl Into<EvalInput>) -> Result<TValue, EvalError> {
        if self.actions.is_empty() {
            return Err(EvalError::from(ActionError::no_root()));
        }
        let node = match input.into() {
            EvalInput::Source(source) => self.grammar.parse(&source)?,
            EvalInput::Node(node) => node,
        };
        self.eval_node(&node).map_err(EvalError::from)
    }

    fn eval_node(&self, node: &Node) -> Result<TValue, ActionError> {
        let name = node
            .name
            .as_deref()
            .ok_or_else(|| ActionError::new("<anonymous>", "node has no rule name"))?;
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| ActionError::new(name, "no action registered for this rule"))?;
        match action {
            Action::Raw(f) => Ok(f(&node.text)),
            Action::Folded(f) => {
                let children = self.collect_child_values(node)?;
                Ok(f(&node.text, children))
            }
            Action::NodeFolded(f) => {
                let children = self.collect_child_values(node)?;
                Ok(f(node, children))
            }
        }
    }

    fn collect_child_values(&self, node: &Node) -> Result<Vec<TValue>, ActionError> {
        let mut values = Vec::new();
        for child in &node.children {
            let registered = child.name.as_deref().map_or(false, |n| self.actions.contains_key(n));
            if registered {
                values.push(self.eval_node(child)?);
            } else {
                values.extend(self.collect_child_values(child)?);
            }
        }
        Ok(values)
    }
}
