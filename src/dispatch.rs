//! # Dispatch — Strategy Selection
//!
//! Routes the two public queries to a configured strategy:
//!
//! - `nth_prime` → [`WheelSieve`] by default. It never materializes the
//!   sequence, so it is the only choice for n in the 10^8 range.
//! - `primes_up_to_nth` → [`SegmentedSieve`] by default. Its window buffer is
//!   O(√bound), though the returned sequence itself is O(n).
//!
//! [`FullSieve`] stays selectable for small n, where its single flat buffer is
//! the fastest of the three.

use tracing::debug;

use crate::config::{SieveConfig, SievePolicy, Strategy};
use crate::error::SieveError;
use crate::full::FullSieve;
use crate::segmented::SegmentedSieve;
use crate::wheel::WheelSieve;
use crate::{NthPrime, PrimeSequence};

/// Build the n-th prime strategy for `strategy`.
pub fn nth_strategy(strategy: Strategy, policy: SievePolicy) -> Box<dyn NthPrime> {
    match strategy {
        Strategy::Full => Box::new(FullSieve::new(policy)),
        Strategy::Segmented => Box::new(SegmentedSieve::new(policy)),
        Strategy::Wheel => Box::new(WheelSieve::new(policy)),
    }
}

/// Build the sequence strategy for `strategy`. The wheel sieve only answers
/// single ranks and is rejected.
pub fn sequence_strategy(
    strategy: Strategy,
    policy: SievePolicy,
) -> Result<Box<dyn PrimeSequence>, SieveError> {
    match strategy {
        Strategy::Full => Ok(Box::new(FullSieve::new(policy))),
        Strategy::Segmented => Ok(Box::new(SegmentedSieve::new(policy))),
        Strategy::Wheel => Err(SieveError::invalid_config(
            "the wheel sieve cannot produce a prime sequence",
        )),
    }
}

/// Answers queries with the strategies chosen by a [`SieveConfig`].
pub struct Dispatcher {
    config: SieveConfig,
    nth: Box<dyn NthPrime>,
    sequence: Box<dyn PrimeSequence>,
}

impl Dispatcher {
    pub fn new(config: SieveConfig) -> Result<Self, SieveError> {
        config.validate()?;
        let policy = config.policy();
        Ok(Dispatcher {
            nth: nth_strategy(config.nth_strategy, policy),
            sequence: sequence_strategy(config.sequence_strategy, policy)?,
            config,
        })
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// The 0-indexed n-th prime.
    pub fn nth_prime(&self, n: u64) -> Result<u64, SieveError> {
        debug!(strategy = self.nth.name(), n, "nth_prime");
        self.nth.nth_prime(n)
    }

    /// Every prime up to and including the n-th, ascending.
    pub fn primes_up_to_nth(&self, n: u64) -> Result<Vec<u64>, SieveError> {
        debug!(strategy = self.sequence.name(), n, "primes_up_to_nth");
        self.sequence.primes_up_to_nth(n)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        let policy = SievePolicy::default();
        Dispatcher {
            config: SieveConfig::default(),
            nth: Box::new(WheelSieve::new(policy)),
            sequence: Box::new(SegmentedSieve::new(policy)),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("nth", &self.nth.name())
            .field("sequence", &self.sequence.name())
            .finish()
    }
}
