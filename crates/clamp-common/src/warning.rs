//! Deduplicated warnings.
//!
//! Styles, markup and clamp values that the workspace only partially
//! understands are reported once per unique message, so a truncation pass
//! that measures the same element hundreds of times does not flood the log.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about unsupported input (emitted once per unique message)
///
/// # Example
/// ```
/// use clamp_common::warning::warn_once;
///
/// warn_once("CSS", "unsupported unit 'vh' in line-height: 2vh");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time {
        tracing::warn!(component, "{message}");
    }
}

/// Returns true if this exact warning has already been emitted.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("test", "recorded message");
        assert!(was_warned("test", "recorded message"));
        assert!(!was_warned("test", "never emitted"));
    }

    #[test]
    fn test_components_are_distinct_keys() {
        warn_once("A", "same text");
        assert!(was_warned("A", "same text"));
        assert!(!was_warned("B", "same text"));
    }
}
