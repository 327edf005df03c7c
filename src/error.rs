//! # Error — Failure Taxonomy for Prime Queries
//!
//! Every strategy returns [`SieveError`] on failure. Queries are pure, so an
//! error fails the call only; the same rank always fails the same way except
//! for allocation failures caused by outside memory pressure.

/// Errors from n-th prime queries.
#[derive(Debug, Clone, PartialEq)]
pub enum SieveError {
    /// The rank is negative or too large for the 2^53 result range.
    InvalidArgument { reason: String },
    /// The sieve buffer could not be allocated, or exceeds the configured ceiling.
    ResourceExhausted {
        strategy: &'static str,
        requested_bytes: u64,
    },
    /// The bound estimate stayed too small after every permitted regrowth.
    BoundTooSmall { n: u64, limit: u64, attempts: u32 },
    /// The configuration failed validation.
    InvalidConfig { reason: String },
}

impl SieveError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        SieveError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        SieveError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SieveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SieveError::InvalidArgument { reason } => write!(f, "invalid argument: {}", reason),
            SieveError::ResourceExhausted {
                strategy,
                requested_bytes,
            } => write!(
                f,
                "{} sieve cannot allocate {} bytes",
                strategy, requested_bytes
            ),
            SieveError::BoundTooSmall { n, limit, attempts } => write!(
                f,
                "bound estimate for n={} still too small at limit {} after {} attempts",
                n, limit, attempts
            ),
            SieveError::InvalidConfig { reason } => write!(f, "invalid sieve config: {}", reason),
        }
    }
}

impl std::error::Error for SieveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let err = SieveError::ResourceExhausted {
            strategy: "full",
            requested_bytes: 1024,
        };
        assert_eq!(err.to_string(), "full sieve cannot allocate 1024 bytes");

        let err = SieveError::BoundTooSmall {
            n: 4,
            limit: 10,
            attempts: 1,
        };
        assert!(err.to_string().contains("n=4"));
        assert!(err.to_string().contains("limit 10"));

        let err = SieveError::invalid_argument("rank must be non-negative, got -1");
        assert!(err.to_string().starts_with("invalid argument"));
    }

    #[test]
    fn converts_into_anyhow() {
        fn fails() -> anyhow::Result<()> {
            Err::<(), _>(SieveError::invalid_config("regrowth_factor must exceed 1"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(err.to_string().contains("regrowth_factor"));
    }
}
