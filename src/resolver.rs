//! The reference resolver (§4.4): rewrites a list of named top-level matchers into a
//! resolved graph where every [`Reference`](crate::matcher::MatcherKind::Reference) has
//! been replaced by the matcher object it names.
//!
//! The graph produced by [`GrammarGenerator`](crate::generator) (and the hand-built
//! meta-grammar, which resolves itself the same way — see [`crate::meta_grammar`]) is
//! cyclic: grammar rules call each other recursively. The rewrite is a depth-first walk
//! that detaches each matcher's current child list before recursing into the former
//! children and reattaching the rewritten list. A matcher already mid-rewrite (reachable
//! through its own descendants) is recognized by a visited-pointer set and returned as-is
//! instead of being walked again, which is what keeps the rewrite from recursing forever
//! on self-referential rules — mirroring the teacher's own visited-set idiom used by
//! `NTHelper::validate`/`obtain_nullability` to guard against circular dependencies.

use crate::error::ResolveError;
use crate::matcher::{Matcher, MatcherKind};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Resolves `Reference` placeholders against a name → matcher registry.
pub struct ReferenceResolver {
    registry: HashMap<String, Rc<Matcher>>,
}

impl ReferenceResolver {
    /// Build a resolver from the ordered list of named rules a grammar defines. Later
    /// rules with a name already seen do not replace the earlier one (first registration
    /// wins, matching the "insertion order determines the root rule" rule registry
    /// invariant elsewhere in the system).
    pub fn new(rules: &[(String, Rc<Matcher>)]) -> Self {
        let mut registry = HashMap::with_capacity(rules.len());
        for (name, matcher) in rules {
            registry.entry(name.clone()).or_insert_with(|| matcher.clone());
        }
        ReferenceResolver { registry }
    }

    /// Resolve `entry`, returning the fully resolved (possibly cyclic) matcher graph.
    ///
    /// Guarantees: after this returns `Ok`, no `Reference` is reachable from the result.
    pub fn resolve(&self, entry: &Rc<Matcher>) -> Result<Rc<Matcher>, ResolveError> {
        let mut in_progress: HashSet<*const Matcher> = HashSet::new();
        self.resolve_node(entry.clone(), &mut in_progress)
    }

    /// Convenience: resolve the first rule in `rules` (the grammar's entry point).
    pub fn resolve_rules(rules: &[(String, Rc<Matcher>)]) -> Result<Rc<Matcher>, ResolveError> {
        let entry = &rules
            .first()
            .expect("a grammar must define at least one rule")
            .1;
        ReferenceResolver::new(rules).resolve(entry)
    }

    fn resolve_node(
        &self,
        matcher: Rc<Matcher>,
        in_progress: &mut HashSet<*const Matcher>,
    ) -> Result<Rc<Matcher>, ResolveError> {
        if let MatcherKind::Reference(name) = matcher.kind() {
            let target = self
                .registry
                .get(name)
                .ok_or_else(|| ResolveError::new(name.clone()))?
                .clone();
            return self.resolve_node(target, in_progress);
        }

        let ptr = Rc::as_ptr(&matcher);
        if !in_progress.insert(ptr) {
            // Already resolved, or resolution of this very matcher is further up the call
            // stack (a cycle through it). Either way the handle is correct to hand back:
            // if it is mid-rewrite, the in-flight call will finish reattaching its
            // children once the recursion that led here unwinds.
            return Ok(matcher);
        }

        let old_children = matcher.take_children();
        let mut new_children = Vec::with_capacity(old_children.len());
        for child in old_children {
            new_children.push(self.resolve_node(child, in_progress)?);
        }
        matcher.set_children(new_children);
        Ok(matcher)
    }
}

#[cfg(test)]
mod __tests__;
