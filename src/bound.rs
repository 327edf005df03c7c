//! # Bound — n-th Prime Magnitude Estimation
//!
//! Every sieve needs to know how far to sieve before it starts. This module
//! estimates the magnitude of the n-th prime (0-indexed) with
//!
//! ```text
//! limit = ⌈n·(ln n + ln ln n) + 3⌉        (n ≥ 3)
//! ```
//!
//! and answers n = 0, 1, 2 directly (2, 3, 5).
//!
//! The estimate is empirical, not a proven upper bound: it undershoots at
//! n = 4 (limit 10, but the 4th prime is 11). Strategies therefore run through
//! [`resolve`], which re-sieves with a grown limit whenever a pass finds fewer
//! than n + 1 primes.
//!
//! ## Wheel Index Space
//!
//! The wheel sieve stores only values ≡ 1, 5 (mod 6) from 5 upward. Bit `k`
//! represents `3k + 5 − (k mod 2)`:
//!
//! | k | 0 | 1 | 2  | 3  | 4  | 5  | 6  |
//! |---|---|---|----|----|----|----|----|
//! | v | 5 | 7 | 11 | 13 | 17 | 19 | 23 |
//!
//! [`wheel_index`] maps a value v to `2⌊v/6⌋ + δ` (δ = −1 when v ≡ 0, +1 when
//! v ≡ 5, else 0), which is the number of wheel candidates in `[5, v]`, i.e. an
//! exclusive index bound covering every candidate ≤ v.

use tracing::warn;

use crate::config::SievePolicy;
use crate::error::SieveError;

/// Largest limit a query may sieve to; results must stay exactly representable
/// as an IEEE-754 double.
pub const MAX_LIMIT: u64 = 1 << 53;

/// Primes answered without sieving, indexed by rank.
pub const SMALL_PRIMES: [u64; 3] = [2, 3, 5];

/// Sieve extent derived from a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    /// Inclusive upper bound on the value of the n-th prime.
    pub limit: u64,
    /// `⌊√limit⌋ + 1`: every prime below `root` must be known before the
    /// full range can be sieved.
    pub root: u64,
}

impl Bound {
    pub fn from_limit(limit: u64) -> Self {
        Bound {
            limit,
            root: isqrt(limit) + 1,
        }
    }

    /// Square root threshold without the `+1`, used by the wheel sieve whose
    /// index rescaling already makes the bound exclusive.
    #[inline]
    pub fn wheel_root(&self) -> u64 {
        isqrt(self.limit)
    }
}

/// Result of estimating a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimate {
    /// n ≤ 2: the prime itself.
    Exact(u64),
    Bound(Bound),
}

/// Unrounded `n·(ln n + ln ln n) + 3`.
pub fn approximate_nth_prime(n: u64) -> f64 {
    let nf = n as f64;
    let ln = nf.ln();
    nf * (ln + ln.ln()) + 3.0
}

/// Estimate the sieve bound for rank `n` using the plain formula.
pub fn estimate(n: u64) -> Result<Estimate, SieveError> {
    estimate_with_margin(n, 0.0)
}

/// Estimate the sieve bound for rank `n`, widened by `margin` (0.1 = +10%).
pub fn estimate_with_margin(n: u64, margin: f64) -> Result<Estimate, SieveError> {
    if n < SMALL_PRIMES.len() as u64 {
        return Ok(Estimate::Exact(SMALL_PRIMES[n as usize]));
    }
    let mut limit = approximate_nth_prime(n).ceil();
    if margin > 0.0 {
        limit = (limit * (1.0 + margin)).ceil();
    }
    if !limit.is_finite() || limit > MAX_LIMIT as f64 {
        return Err(SieveError::invalid_argument(format!(
            "rank {} exceeds the 2^53 result range",
            n
        )));
    }
    Ok(Estimate::Bound(Bound::from_limit(limit as u64)))
}

/// Grow `bound` by `factor`, always by at least one.
pub fn grow(bound: Bound, factor: f64) -> Bound {
    let scaled = (bound.limit as f64 * factor).ceil();
    let limit = if scaled.is_finite() && scaled < MAX_LIMIT as f64 {
        (scaled as u64).max(bound.limit + 1)
    } else {
        MAX_LIMIT
    };
    Bound::from_limit(limit)
}

/// Run `attempt` against `first`, regrowing the bound each time it reports the
/// limit was too small (`Ok(None)`).
pub(crate) fn resolve<T>(
    n: u64,
    first: Bound,
    policy: &SievePolicy,
    strategy: &'static str,
    mut attempt: impl FnMut(Bound) -> Result<Option<T>, SieveError>,
) -> Result<T, SieveError> {
    let mut bound = first;
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        if let Some(found) = attempt(bound)? {
            return Ok(found);
        }
        if attempts > policy.max_regrowths || bound.limit >= MAX_LIMIT {
            return Err(SieveError::BoundTooSmall {
                n,
                limit: bound.limit,
                attempts,
            });
        }
        let next = grow(bound, policy.regrowth_factor);
        warn!(
            strategy,
            n,
            limit = bound.limit,
            next_limit = next.limit,
            "bound estimate too small, regrowing"
        );
        bound = next;
    }
}

/// Integer square root, exact for all u64.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).is_some_and(|sq| sq <= n) {
        x += 1;
    }
    x
}

/// Number of wheel candidates (values ≡ 1, 5 mod 6, from 5 upward) that are
/// ≤ `v`. Used as an exclusive bit-index bound.
#[inline]
pub fn wheel_index(v: u64) -> u64 {
    let base = 2 * (v / 6);
    match v % 6 {
        0 => base.saturating_sub(1),
        5 => base + 1,
        _ => base,
    }
}

/// Value represented by wheel bit `k`.
#[inline]
pub fn wheel_value(k: u64) -> u64 {
    3 * k + 5 - (k & 1)
}
