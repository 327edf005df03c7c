//! TOML configuration for strategy selection, bound tuning, and memory limits.
//!
//! ```toml
//! nth_strategy = "wheel"
//! sequence_strategy = "segmented"
//! bound_margin = 0.0
//! regrowth_factor = 1.25
//! max_regrowths = 8
//! memory_limit_bytes = 268435456
//! ```
//!
//! Every key is optional. Parsing and file loading return `anyhow::Result`;
//! [`SieveConfig::validate`] returns the typed [`SieveError::InvalidConfig`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SieveError;

/// Sieve algorithm selectable in a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Full,
    Segmented,
    Wheel,
}

impl Strategy {
    /// Whether the strategy can return the whole prime sequence.
    pub fn yields_sequence(self) -> bool {
        !matches!(self, Strategy::Wheel)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Full => write!(f, "full"),
            Strategy::Segmented => write!(f, "segmented"),
            Strategy::Wheel => write!(f, "wheel"),
        }
    }
}

/// Top-level sieve configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SieveConfig {
    /// Strategy answering `nth_prime`.
    pub nth_strategy: Strategy,
    /// Strategy answering `primes_up_to_nth`; must yield sequences.
    pub sequence_strategy: Strategy,
    /// Fractional widening of the first bound estimate.
    pub bound_margin: f64,
    /// Multiplier applied to an undersized bound before re-sieving.
    pub regrowth_factor: f64,
    /// Re-sieves allowed after the first pass.
    pub max_regrowths: u32,
    /// Ceiling on any single sieve buffer, in bytes.
    pub memory_limit_bytes: Option<u64>,
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            nth_strategy: Strategy::Wheel,
            sequence_strategy: Strategy::Segmented,
            bound_margin: 0.0,
            regrowth_factor: 1.25,
            max_regrowths: 8,
            memory_limit_bytes: None,
        }
    }
}

impl SieveConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SieveConfig = toml::from_str(text).context("Failed to parse sieve config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sieve config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), SieveError> {
        if !self.sequence_strategy.yields_sequence() {
            return Err(SieveError::invalid_config(format!(
                "sequence_strategy '{}' only answers single ranks",
                self.sequence_strategy
            )));
        }
        if !self.bound_margin.is_finite() || self.bound_margin < 0.0 {
            return Err(SieveError::invalid_config(format!(
                "bound_margin must be a non-negative number, got {}",
                self.bound_margin
            )));
        }
        if !self.regrowth_factor.is_finite() || self.regrowth_factor <= 1.0 {
            return Err(SieveError::invalid_config(format!(
                "regrowth_factor must exceed 1, got {}",
                self.regrowth_factor
            )));
        }
        if self.memory_limit_bytes == Some(0) {
            return Err(SieveError::invalid_config(
                "memory_limit_bytes must be positive",
            ));
        }
        Ok(())
    }

    /// The tuning subset every strategy carries.
    pub fn policy(&self) -> SievePolicy {
        SievePolicy {
            bound_margin: self.bound_margin,
            regrowth_factor: self.regrowth_factor,
            max_regrowths: self.max_regrowths,
            memory_limit_bytes: self.memory_limit_bytes,
        }
    }
}

/// Bound and allocation tuning shared by all strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SievePolicy {
    pub bound_margin: f64,
    pub regrowth_factor: f64,
    pub max_regrowths: u32,
    pub memory_limit_bytes: Option<u64>,
}

impl Default for SievePolicy {
    fn default() -> Self {
        SieveConfig::default().policy()
    }
}

impl SievePolicy {
    /// Allocate a sieve buffer of `len` copies of `fill`, failing with
    /// `ResourceExhausted` instead of aborting when memory is unavailable.
    pub(crate) fn allocate<T: Clone>(
        &self,
        strategy: &'static str,
        len: u64,
        fill: T,
    ) -> Result<Vec<T>, SieveError> {
        let requested_bytes = len.saturating_mul(std::mem::size_of::<T>() as u64);
        let exhausted = SieveError::ResourceExhausted {
            strategy,
            requested_bytes,
        };
        if self
            .memory_limit_bytes
            .is_some_and(|ceiling| requested_bytes > ceiling)
        {
            return Err(exhausted);
        }
        let len = usize::try_from(len).map_err(|_| exhausted.clone())?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| exhausted)?;
        buf.resize(len, fill);
        Ok(buf)
    }
}
