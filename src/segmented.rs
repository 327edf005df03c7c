//! # Segmented — Windowed Sieve of Eratosthenes
//!
//! Finds the primes below `⌊√limit⌋ + 1` with the full sieve, then crosses off
//! their multiples in consecutive windows of that same width. Only one window
//! buffer exists at a time, so peak buffer memory is O(√limit) instead of
//! O(limit). The output sequence itself still grows with n.
//!
//! The window buffer is allocated once and cleared at every window boundary;
//! nothing survives between calls.

use tracing::debug;

use crate::bound::{self, Bound, Estimate, SMALL_PRIMES};
use crate::config::SievePolicy;
use crate::error::SieveError;
use crate::full;
use crate::{NthPrime, PrimeSequence};

const NAME: &str = "segmented";

/// Segmented Eratosthenes sieve; the default sequence strategy.
#[derive(Debug, Clone, Default)]
pub struct SegmentedSieve {
    policy: SievePolicy,
}

impl SegmentedSieve {
    pub fn new(policy: SievePolicy) -> Self {
        SegmentedSieve { policy }
    }

    /// One pass over `[0, bound.limit]`. Returns `None` when the bound holds
    /// fewer than `want` primes.
    fn sieve_segments(&self, want: usize, bound: Bound) -> Result<Option<Vec<u64>>, SieveError> {
        let segment = bound.root;
        let end = bound.limit + 1;

        // Seeds: every prime ≤ ⌊√limit⌋. Windows start at `segment`, so the
        // seed block and the first window never overlap.
        let mut primes = full::sieve_to(segment - 1, &self.policy)?;
        let seed_count = primes.len();
        if seed_count >= want {
            primes.truncate(want);
            return Ok(Some(primes));
        }
        primes.reserve(want - seed_count);

        let mut window = self.policy.allocate(NAME, segment + 1, false)?;
        let mut bottom = segment;
        let mut segments = 0u64;
        while bottom < end {
            let top = (bottom + segment).min(end);
            window.fill(false);

            for &p in &primes[..seed_count] {
                if p * p >= top {
                    break;
                }
                let mut m = (p * p).max(bottom.div_ceil(p) * p);
                while m < top {
                    window[(m - bottom) as usize] = true;
                    m += p;
                }
            }

            for v in bottom..top {
                if !window[(v - bottom) as usize] {
                    primes.push(v);
                    if primes.len() == want {
                        debug!(
                            limit = bound.limit,
                            segment,
                            segments = segments + 1,
                            seeds = seed_count,
                            "segmented sieve complete"
                        );
                        return Ok(Some(primes));
                    }
                }
            }

            bottom = top;
            segments += 1;
        }

        debug!(
            limit = bound.limit,
            segments,
            found = primes.len(),
            want,
            "segmented sieve exhausted bound"
        );
        Ok(None)
    }
}

impl NthPrime for SegmentedSieve {
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

impl PrimeSequence for SegmentedSieve {
    fn primes_up_to_nth(&self, n: u64) -> Result<Vec<u64>, SieveError> {
        let first = match bound::estimate_with_margin(n, self.policy.bound_margin)? {
            Estimate::Exact(_) => return Ok(SMALL_PRIMES[..=n as usize].to_vec()),
            Estimate::Bound(b) => b,
        };
        let want = usize::try_from(n + 1)
            .map_err(|_| SieveError::invalid_argument(format!("rank {} exceeds usize", n)))?;
        bound::resolve(n, first, &self.policy, NAME, |b| self.sieve_segments(want, b))
    }
}
