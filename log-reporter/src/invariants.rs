use std::fmt;

use derive_more::From;

/// Result-count cap for the author and error-day reports.
///
/// Negative limits are unrepresentable; construct from a `u64` or use
/// [`ReportLimit::unbounded`]. Unbounded renders as SQL NULL, which
/// PostgreSQL treats the same as `LIMIT ALL`.
#[derive(Debug, From, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimit(Option<u64>);

impl ReportLimit {
    pub fn unbounded() -> Self {
        Self(None)
    }

    /// Value to bind for a `LIMIT $n` placeholder.
    pub fn to_sql(self) -> Option<i64> {
        self.0.map(|n| i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<u64> for ReportLimit {
    fn from(n: u64) -> Self {
        Self(Some(n))
    }
}

impl fmt::Display for ReportLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "unbounded"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use asserting::prelude::*;

    #[test]
    fn bounded_limit_binds_as_bigint() {
        assert_eq!(ReportLimit::from(3u64).to_sql(), Some(3));
        assert_eq!(ReportLimit::from(0u64).to_sql(), Some(0));
    }

    #[test]
    fn unbounded_limit_binds_as_null() {
        assert_eq!(ReportLimit::unbounded().to_sql(), None);
    }

    #[test]
    fn oversized_limit_saturates() {
        assert_eq!(ReportLimit::from(u64::MAX).to_sql(), Some(i64::MAX));
    }

    #[test]
    fn displays_for_logging() {
        assert_that!(ReportLimit::from(7u64).to_string()).is_equal_to("7".to_string());
        assert_that!(ReportLimit::unbounded().to_string()).is_equal_to("unbounded".to_string());
    }
}
