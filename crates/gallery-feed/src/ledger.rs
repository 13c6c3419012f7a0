use std::collections::HashMap;

/// Consecutive-failure counts per page, scoped to one feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryLedger {
    failures: HashMap<u32, u32>,
}

impl RetryLedger {
    pub fn new() -> Self { Self::default() }

    pub fn count(&self, page: u32) -> u32 { self.failures.get(&page).copied().unwrap_or(0) }

    /// Count one more failure of `page` and return the new total.
    pub fn record_failure(&mut self, page: u32) -> u32 {
        let count = self.failures.entry(page).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn clear(&mut self, page: u32) { self.failures.remove(&page); }

    pub fn clear_all(&mut self) { self.failures.clear(); }

    pub fn is_empty(&self) -> bool { self.failures.is_empty() }
}
