//! Input requirement detection
//!
//! A pattern heuristic, not a parse. Under- and over-detection both only cost
//! the caller one extra round trip.

use crate::config::LanguageRegistry;

/// Decide whether `code` is likely to block on interactive input.
///
/// Unknown languages and languages without input patterns never require
/// input.
pub fn requires_input(registry: &LanguageRegistry, code: &str, language_key: &str) -> bool {
    match registry.lookup(language_key) {
        Ok(language) => language.reads_input(code),
        Err(_) => false,
    }
}
