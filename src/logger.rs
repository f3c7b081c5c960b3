//! Debug-trace logging for the matcher algebra.
//!
//! Ported from `lang-pt`'s `util::Log<T>`: an ordered verbosity level plus free functions
//! that `println!` a trace line when the configured level is high enough. Gated entirely
//! behind `cfg(debug_assertions)`, so release builds pay nothing and the calls disappear.
//! The level is process-wide (a thread-local `Cell`, mirroring the single-threaded,
//! per-instance `OnceCell<Log<_>>` debuggers the teacher attaches to each production —
//! here there is one matcher graph per `Grammar`, so one level per thread is enough).

use std::cell::Cell;
use std::fmt::{self, Display, Formatter};

/// Verbosity level for matcher tracing, ordered low-to-high by [`Log::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Log<T> {
    /// Tracing disabled.
    None,
    /// Trace matcher entry only.
    Default(T),
    /// Trace matcher entry and successful matches.
    Success(T),
    /// Trace matcher entry, successes and failures.
    Result(T),
    /// Trace everything, including repetition-loop iterations.
    Verbose(T),
}

impl<T> Log<T> {
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

thread_local! {
    static LEVEL: Cell<u8> = Cell::new(Log::None::<()>.order());
}

/// Set the process-wide (thread-local) trace level. `Log::None` (the default) disables tracing.
pub fn set_level(level: Log<()>) {
    LEVEL.with(|l| l.set(level.order()));
}

fn enabled(threshold: u8) -> bool {
    LEVEL.with(|l| l.get() >= threshold)
}

fn snippet(text: &str) -> &str {
    match text.char_indices().nth(20) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Trace a matcher being entered against the remaining (unconsumed) text.
#[cfg(debug_assertions)]
pub fn log_entry(label: &str, remaining: &str) {
    if enabled(Log::Default(()).order()) {
        println!("[{}] try {:?}…", label, snippet(remaining));
    }
}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub fn log_entry(_label: &str, _remaining: &str) {}

/// Trace a matcher succeeding. `consumed` is the text it matched.
#[cfg(debug_assertions)]
pub fn log_success(label: &str, consumed: &str) {
    if enabled(Log::Success(()).order()) {
        println!("[{}] matched {:?}", label, snippet(consumed));
    }
}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub fn log_success(_label: &str, _consumed: &str) {}

/// Trace a matcher failing to match against the remaining (unconsumed) text.
#[cfg(debug_assertions)]
pub fn log_failure(label: &str, remaining: &str) {
    if enabled(Log::Result(()).order()) {
        println!("[{}] failed on {:?}…", label, snippet(remaining));
    }
}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub fn log_failure(_label: &str, _remaining: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_monotonic() {
        assert!(Log::None::<()>.order() < Log::Default(()).order());
        assert!(Log::Default(()).order() < Log::Success(()).order());
        assert!(Log::Success(()).order() < Log::Result(()).order());
        assert!(Log::Result(()).order() < Log::Verbose(()).order());
    }
}
