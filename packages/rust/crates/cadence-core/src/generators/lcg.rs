//! Linear-congruential pseudo-random stream.
//!
//! Constants follow the classic C library set for reproducibility. This is not
//! a source of unpredictability and must not be used where that matters.

/// Modulus `2^31 - 1`.
pub const LCG_MODULUS: u64 = (1 << 31) - 1;
/// Multiplier from the C library constant set.
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
/// Increment from the C library constant set.
pub const LCG_INCREMENT: u64 = 12_345;

/// `state = (multiplier * state + increment) mod modulus`, one value per pull.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Stream seeded exactly with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Stream seeded from the current time and process id.
    ///
    /// Two processes started in the same second with nearby
    /// pids get related streams.
    #[must_use]
    pub fn from_time_and_pid() -> Self {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        let pid = u64::from(std::process::id());
        Self::new(now.wrapping_mul(pid) % LCG_MODULUS)
    }

    /// Seed when given, otherwise [`Self::from_time_and_pid`].
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_time_and_pid, Self::new)
    }
}

impl Iterator for Lcg {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let next = (u128::from(LCG_MULTIPLIER) * u128::from(self.state) + u128::from(LCG_INCREMENT))
            % u128::from(LCG_MODULUS);
        // Always below the modulus, which fits in 31 bits.
        self.state = u64::try_from(next).unwrap_or_default();
        Some(self.state)
    }
}
