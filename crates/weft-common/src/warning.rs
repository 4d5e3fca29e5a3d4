//! Deduplicated parser diagnostics.
//!
//! Markup errors repeat a lot in real documents (every stray `</p>` in a
//! page produces the same complaint). These helpers make sure each distinct
//! message reaches the logger only once per component until
//! [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use log::Level;

/// Global set of messages we've already logged.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Log `message` for `component` at `level`, once per unique message.
///
/// Returns `true` if the message was new and has been handed to the logger.
pub fn log_once(level: Level, component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let is_new = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if is_new {
        log::log!(target: "weft", level, "[{component}] {message}");
    }
    is_new
}

/// Warn about a recoverable problem (logged once per unique message).
///
/// # Example
/// ```
/// weft_common::warning::warn_once("Tree Builder", "resume() called while not suspended");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let _ = log_once(Level::Warn, component, message);
}

/// Forget every message recorded so far (call before parsing a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_messages_are_suppressed() {
        clear_warnings();
        assert!(log_once(Level::Debug, "test", "duplicate-attribute"));
        assert!(!log_once(Level::Debug, "test", "duplicate-attribute"));
        assert!(log_once(Level::Debug, "other", "duplicate-attribute"));
    }
}
