/// Perfect squares 1, 4, 9, 16, ... built by adding consecutive odd numbers.
///
/// Uses `n² = (n-1)² + (2n-1)`, so no multiplication is needed. The sequence
/// ends instead of wrapping once the next square no longer fits in `u64`.
#[derive(Debug, Clone)]
pub struct PerfectSquares {
    square: Option<u64>,
    increment: u64,
}

impl PerfectSquares {
    /// Sequence starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            square: Some(1),
            increment: 3,
        }
    }
}

impl Default for PerfectSquares {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for PerfectSquares {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.square?;
        self.square = current.checked_add(self.increment);
        self.increment = self.increment.saturating_add(2);
        Some(current)
    }
}
