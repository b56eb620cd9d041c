//! Opaque identifiers for store entries.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Serialize, Serializer};

/// Global entry ID counter.
static ENTRY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a blacklist or message log entry.
///
/// Opaque to callers; the only supported operations are equality and display.
/// Unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

impl EntryId {
    /// Allocate a new unique entry ID.
    pub fn new() -> Self {
        Self(ENTRY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ent_{}", self.0)
    }
}

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = EntryId::new();
        let b = EntryId::new();
        let c = EntryId::new();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_is_opaque_string() {
        let id = EntryId::new();
        assert!(id.to_string().starts_with("ent_"));
    }
}
