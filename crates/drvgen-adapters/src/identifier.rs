//! Identifier allocators.

use std::sync::atomic::{AtomicU64, Ordering};

use drvgen_core::{application::ports::IdentifierAllocator, domain::UniqueIdentifier};
use uuid::Uuid;

/// Random (version 4) identifiers from the operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidAllocator;

impl UuidAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierAllocator for UuidAllocator {
    fn new_identifier(&self) -> UniqueIdentifier {
        UniqueIdentifier::from_uuid(Uuid::new_v4())
    }
}

/// Deterministic identifiers: a fixed 64-bit prefix plus a counter.
///
/// For tests and reproducible output. Never returns nil unless the prefix
/// is zero and the counter wraps.
#[derive(Debug)]
pub struct SequenceAllocator {
    prefix: u64,
    next: AtomicU64,
}

impl SequenceAllocator {
    pub fn new(prefix: u64) -> Self {
        Self {
            prefix,
            next: AtomicU64::new(1),
        }
    }

    /// Identifier the `n`th call (1-based) returns.
    pub fn nth(&self, n: u64) -> UniqueIdentifier {
        UniqueIdentifier::from_uuid(Uuid::from_u64_pair(self.prefix, n))
    }
}

impl IdentifierAllocator for SequenceAllocator {
    fn new_identifier(&self) -> UniqueIdentifier {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        self.nth(n)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ten_thousand_random_identifiers_are_distinct() {
        let allocator = UuidAllocator::new();
        let ids: HashSet<_> = (0..10_000).map(|_| allocator.new_identifier()).collect();
        assert_eq!(ids.len(), 10_000);
        assert!(!ids.contains(&UniqueIdentifier::nil()));
    }

    #[test]
    fn random_identifiers_render_braced_uppercase() {
        let text = UuidAllocator::new().new_identifier().to_string();
        assert_eq!(text.len(), 38);
        assert!(text.starts_with('{') && text.ends_with('}'));
        assert_eq!(text, text.to_uppercase());
    }

    #[test]
    fn sequence_is_predictable() {
        let allocator = SequenceAllocator::new(0xABCD);
        assert_eq!(allocator.new_identifier(), allocator.nth(1));
        assert_eq!(allocator.new_identifier(), allocator.nth(2));
        assert_eq!(
            allocator.nth(1).to_string(),
            "{00000000-0000-ABCD-0000-000000000001}"
        );
    }
}
