use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Capability every operation error exposes so the runner can classify it.
///
/// The kind is a short stable tag (`"transport"`, `"upload"`, ...) compared
/// against the retry set; the runner never inspects anything else.
pub trait FailureKind {
    /// Stable tag naming this failure's kind.
    fn kind(&self) -> &str;
}

/// Which outcomes of an operation are transient and should be re-attempted.
#[derive(Debug, Clone)]
pub struct RetryPolicy<T> {
    kinds: BTreeSet<String>,
    values: Vec<T>,
}

impl<T> Default for RetryPolicy<T> {
    fn default() -> Self {
        Self {
            kinds: BTreeSet::new(),
            values: Vec::new(),
        }
    }
}

impl<T> RetryPolicy<T> {
    /// Policy that retries nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat failures tagged `kind` as retry-worthy.
    #[must_use]
    pub fn retry_kind(mut self, kind: impl Into<String>) -> Self {
        self.kinds.insert(kind.into());
        self
    }

    /// Treat a successful return equal to `value` as retry-worthy.
    #[must_use]
    pub fn retry_value(mut self, value: T) -> Self {
        self.values.push(value);
        self
    }

    /// Retry-worthy failure kinds, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }

    /// Retry-worthy sentinel values in insertion order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Whether the policy can ever ask for a retry.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty() && self.values.is_empty()
    }
}

impl<T> RetryPolicy<T>
where
    T: PartialEq + Display,
{
    /// Classify one operation outcome; `None` means accept (or propagate).
    pub fn classify<E>(&self, outcome: &Result<T, E>) -> Option<RetryCause>
    where
        E: FailureKind,
    {
        match outcome {
            Err(error) if self.kinds.contains(error.kind()) => Some(RetryCause::Failure {
                kind: error.kind().to_string(),
            }),
            Ok(value) if self.values.contains(value) => Some(RetryCause::Sentinel {
                value: value.to_string(),
            }),
            _ => None,
        }
    }
}

/// Why an attempt was discarded and re-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryCause {
    /// The operation failed with a retry-worthy kind.
    Failure {
        /// Kind tag reported by the error.
        kind: String,
    },
    /// The operation returned a sentinel value.
    Sentinel {
        /// Display rendering of the returned value.
        value: String,
    },
}

impl Display for RetryCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure { kind } => write!(f, "caught {kind} failure"),
            Self::Sentinel { value } => write!(f, "got {value} return value"),
        }
    }
}
