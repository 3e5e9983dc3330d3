/// Monotonic counter starting at 1.
///
/// Unbounded by default; [`Counter::with_limit`] stops after a fixed number of
/// values.
#[derive(Debug, Clone)]
pub struct Counter {
    next: u64,
    end: Option<u64>,
}

impl Counter {
    /// Counts 1, 2, 3, ... forever.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1, end: None }
    }

    /// Counts 1..=`limit`, then reports exhaustion.
    #[must_use]
    pub fn with_limit(limit: u64) -> Self {
        Self {
            next: 1,
            end: Some(limit.saturating_add(1)),
        }
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Counter {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.end.is_some_and(|end| self.next >= end) {
            return None;
        }
        let current = self.next;
        self.next = self.next.checked_add(1)?;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.end {
            Some(end) => {
                let left = usize::try_from(end.saturating_sub(self.next)).unwrap_or(usize::MAX);
                (left, Some(left))
            }
            None => (usize::MAX, None),
        }
    }
}
