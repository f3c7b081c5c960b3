//! Error types raised by the engine.
//!
//! Each failure kind gets its own plain struct/enum with a hand-written [`Display`] and
//! [`std::error::Error`] implementation, in the style of `lang-pt`'s `ParseError` /
//! `ImplementationError` / `ProductionError`. There is no unified crate-level error type:
//! every public entry point returns the specific error its own stage can raise.

use std::fmt::{self, Display, Formatter};

const PREVIEW_LEN: usize = 50;

/// Truncate `text` to at most `PREVIEW_LEN` characters for embedding in an error message.
pub(crate) fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((byte_index, _)) => format!("{}…", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// The grammar source text passed to [`Grammar::new`](crate::grammar::Grammar::new) is malformed.
#[derive(Debug, Clone)]
pub struct GrammarError {
    pub message: String,
}

impl GrammarError {
    pub fn new(message: impl Into<String>) -> Self {
        GrammarError {
            message: message.into(),
        }
    }

    /// A grammar syntax error anchored at the first unparsed byte of the source.
    pub fn syntax(unparsed: &str) -> Self {
        GrammarError::new(format!(
            "could not parse grammar source near \"{}\"",
            preview(unparsed)
        ))
    }
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GrammarError: {}", self.message)
    }
}

impl std::error::Error for GrammarError {}

/// A [`Reference`](crate::matcher::MatcherKind::Reference) names a rule absent from the registry.
#[derive(Debug, Clone)]
pub struct ResolveError {
    pub rule_name: String,
}

impl ResolveError {
    pub fn new(rule_name: impl Into<String>) -> Self {
        ResolveError {
            rule_name: rule_name.into(),
        }
    }
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ResolveError: unknown rule \"{}\"", self.rule_name)
    }
}

impl std::error::Error for ResolveError {}

impl From<ResolveError> for GrammarError {
    fn from(err: ResolveError) -> Self {
        GrammarError::new(err.to_string())
    }
}

/// The root rule matched but did not consume the whole input, or failed outright.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub pointer: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(pointer: usize, message: impl Into<String>) -> Self {
        SyntaxError {
            pointer,
            message: message.into(),
        }
    }

    pub fn unparsed(pointer: usize, remainder: &str) -> Self {
        SyntaxError::new(
            pointer,
            format!("unexpected input near \"{}\"", preview(remainder)),
        )
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SyntaxError: {} (at byte {})", self.message, self.pointer)
    }
}

impl std::error::Error for SyntaxError {}

/// A rule registered with [`Language`](crate::language::Language) was referenced (as the root,
/// or from a nested grammar fragment) but never given an action or matcher.
#[derive(Debug, Clone)]
pub struct ActionError {
    pub rule_name: String,
    pub reason: String,
}

impl ActionError {
    pub fn new(rule_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ActionError {
            rule_name: rule_name.into(),
            reason: reason.into(),
        }
    }

    pub fn no_root() -> Self {
        ActionError::new("<root>", "no rule has been registered")
    }
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ActionError: {} ({})", self.reason, self.rule_name)
    }
}

impl std::error::Error for ActionError {}

/// The union of everything [`Language::eval`](crate::language::Language::eval) can fail with.
#[derive(Debug, Clone)]
pub enum EvalError {
    Grammar(GrammarError),
    Syntax(SyntaxError),
    Action(ActionError),
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Grammar(err) => Display::fmt(err, f),
            EvalError::Syntax(err) => Display::fmt(err, f),
            EvalError::Action(err) => Display::fmt(err, f),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<GrammarError> for EvalError {
    fn from(err: GrammarError) -> Self {
        EvalError::Grammar(err)
    }
}

impl From<SyntaxError> for EvalError {
    fn from(err: SyntaxError) -> Self {
        EvalError::Syntax(err)
    }
}

impl From<ActionError> for EvalError {
    fn from(err: ActionError) -> Self {
        EvalError::Action(err)
    }
}
