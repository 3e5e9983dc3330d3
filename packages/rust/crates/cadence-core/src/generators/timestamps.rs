/// Wall-clock seconds since the Unix epoch, sampled each time a value is pulled.
///
/// The value depends on when `next` is called, not on the position in the
/// sequence. The source is injectable so pipelines can be tested without a
/// real clock.
#[derive(Debug, Clone)]
pub struct Timestamps<S = fn() -> i64> {
    source: S,
}

impl Timestamps {
    /// Timestamps from the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: unix_now,
        }
    }
}

impl Default for Timestamps {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Timestamps<S>
where
    S: FnMut() -> i64,
{
    /// Timestamps read from `source` on every pull.
    pub fn from_source(source: S) -> Self {
        Self { source }
    }
}

impl<S> Iterator for Timestamps<S>
where
    S: FnMut() -> i64,
{
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some((self.source)())
    }
}

/// Current Unix time in whole seconds.
#[must_use]
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_source_on_each_pull() {
        let mut tick = 100;
        let mut stamps = Timestamps::from_source(move || {
            tick += 5;
            tick
        });
        assert_eq!(stamps.next(), Some(105));
        assert_eq!(stamps.next(), Some(110));
    }

    #[test]
    fn system_timestamps_are_recent() {
        let stamp = Timestamps::new().next().unwrap_or_default();
        // 2017-10-07, earlier than any plausible run.
        assert!(stamp > 1_507_389_770);
    }
}
