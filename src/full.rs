//! # Full — Classic Sieve of Eratosthenes
//!
//! Sieves one boolean flag per integer in `[0, limit]`. Simplest strategy and
//! the reference the other two are checked against, but memory grows linearly
//! with the bound: around n ≈ 10^7 the buffer alone is ~180 MB.
//!
//! Complexity: O(limit log log limit) time, O(limit) space.

use tracing::debug;

use crate::bound::{self, Estimate, SMALL_PRIMES};
use crate::config::SievePolicy;
use crate::error::SieveError;
use crate::{NthPrime, PrimeSequence};

const NAME: &str = "full";

/// Full-range Eratosthenes sieve.
#[derive(Debug, Clone, Default)]
pub struct FullSieve {
    policy: SievePolicy,
}

impl FullSieve {
    pub fn new(policy: SievePolicy) -> Self {
        FullSieve { policy }
    }
}

/// Generate all primes ≤ `limit`.
///
/// `composite[i]` starts false for every i; each surviving i ≥ 2 crosses off
/// its multiples from i² upward.
pub fn sieve_to(limit: u64, policy: &SievePolicy) -> Result<Vec<u64>, SieveError> {
    if limit < 2 {
        return Ok(vec![]);
    }
    let mut composite = policy.allocate(NAME, limit + 1, false)?;

    let mut i = 2u64;
    while i * i <= limit {
        if !composite[i as usize] {
            let mut m = i * i;
            while m <= limit {
                composite[m as usize] = true;
                m += i;
            }
        }
        i += 1;
    }

    let mut primes = Vec::with_capacity(estimate_prime_count(limit));
    primes.extend(
        composite
            .iter()
            .enumerate()
            .skip(2)
            .filter(|(_, &c)| !c)
            .map(|(v, _)| v as u64),
    );
    Ok(primes)
}

/// Rough upper estimate of π(n) for pre-allocation.
fn estimate_prime_count(n: u64) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (1.3 * nf / nf.ln()) as usize
}

impl NthPrime for FullSieve {
    fn name(&self) -> &'static str {
        NAME
    }

    fn nth_prime(&self, n: u64) -> Result<u64, SieveError> {
        let primes = self.primes_up_to_nth(n)?;
        primes
            .last()
            .copied()
            .ok_or_else(|| SieveError::invalid_argument(format!("no prime found for rank {}", n)))
    }
}

impl PrimeSequence for FullSieve {
    fn primes_up_to_nth(&self, n: u64) -> Result<Vec<u64>, SieveError> {
        let first = match bound::estimate_with_margin(n, self.policy.bound_margin)? {
            Estimate::Exact(_) => return Ok(SMALL_PRIMES[..=n as usize].to_vec()),
            Estimate::Bound(b) => b,
        };
        let want = n as usize + 1;
        bound::resolve(n, first, &self.policy, NAME, |b| {
            let mut primes = sieve_to(b.limit, &self.policy)?;
            debug!(n, limit = b.limit, found = primes.len(), "full sieve pass");
            if primes.len() < want {
                return Ok(None);
            }
            primes.truncate(want);
            Ok(Some(primes))
        })
    }
}
