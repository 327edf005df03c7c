//! n-th prime computation (0-indexed: rank 0 is 2).
//!
//! Three sieves trade memory for time, with a dispatcher choosing between
//! them. [`nth_prime`] and [`primes_up_to_nth`] use the default dispatcher;
//! build a [`Dispatcher`] from a [`SieveConfig`] to pick strategies or cap
//! memory.

pub mod bound;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod full;
pub mod segmented;
pub mod wheel;

pub use config::{SieveConfig, SievePolicy, Strategy};
pub use dispatch::Dispatcher;
pub use error::SieveError;
pub use full::FullSieve;
pub use segmented::SegmentedSieve;
pub use wheel::WheelSieve;

/// A strategy that answers single ranks.
pub trait NthPrime: Send + Sync {
    /// Short strategy name used in logs and errors.
    fn name(&self) -> &'static str;
    fn nth_prime(&self, n: u64) -> Result<u64, SieveError>;
}

/// A strategy that can also return every prime up to a rank.
pub trait PrimeSequence: NthPrime {
    /// Primes of rank 0..=n, ascending; length is exactly n + 1.
    fn primes_up_to_nth(&self, n: u64) -> Result<Vec<u64>, SieveError>;
}

/// A validated, non-negative prime rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank(u64);

impl Rank {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Rank {
    fn from(n: u64) -> Self {
        Rank(n)
    }
}

impl TryFrom<i64> for Rank {
    type Error = SieveError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        u64::try_from(n).map(Rank).map_err(|_| {
            SieveError::invalid_argument(format!("rank must be non-negative, got {}", n))
        })
    }
}

/// The 0-indexed n-th prime, from the bit-packed wheel sieve.
pub fn nth_prime(n: u64) -> Result<u64, SieveError> {
    Dispatcher::default().nth_prime(n)
}

/// Every prime up to and including the n-th, from the segmented sieve.
pub fn primes_up_to_nth(n: u64) -> Result<Vec<u64>, SieveError> {
    Dispatcher::default().primes_up_to_nth(n)
}
