//! Bounded catalog of identifiers and the random draws over it.
//!
//! The catalog is an inclusive range `[lower, upper]` of identifiers the
//! creature source knows about. Draws go through the [`IdSource`] trait so a
//! session can run on a seeded RNG, the OS RNG, or a scripted sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DexError, DexResult};

/// Upper edge of the default catalog (the first generation).
pub const DEFAULT_CATALOG_SIZE: u32 = 151;

/// Inclusive range of identifiers that may be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogRange {
    lower: u32,
    upper: u32,
}

impl CatalogRange {
    /// Create a range, rejecting a zero lower edge or an inverted range.
    pub fn new(lower: u32, upper: u32) -> DexResult<Self> {
        if lower == 0 || lower > upper {
            return Err(DexError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// The range `[1, size]`.
    pub fn with_size(size: u32) -> DexResult<Self> {
        Self::new(1, size)
    }

    /// Lower edge (inclusive).
    pub fn lower(&self) -> u32 {
        self.lower
    }

    /// Upper edge (inclusive).
    pub fn upper(&self) -> u32 {
        self.upper
    }

    /// Number of identifiers in the range.
    pub fn len(&self) -> usize {
        (self.upper - self.lower) as usize + 1
    }

    /// Always false: a range holds at least one identifier.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `id` lies inside the range.
    pub fn contains(&self, id: u32) -> bool {
        (self.lower..=self.upper).contains(&id)
    }

    /// Iterate every identifier in ascending order.
    pub fn ids(&self) -> std::ops::RangeInclusive<u32> {
        self.lower..=self.upper
    }
}

impl Default for CatalogRange {
    fn default() -> Self {
        Self {
            lower: 1,
            upper: DEFAULT_CATALOG_SIZE,
        }
    }
}

impl std::fmt::Display for CatalogRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}..#{}", self.lower, self.upper)
    }
}

/// Source of uniformly distributed draws.
pub trait IdSource {
    /// Return a value in `[lower, upper]`. Callers guarantee `lower <= upper`.
    fn draw(&mut self, lower: u32, upper: u32) -> u32;

    /// Draw an identifier from `range`.
    fn draw_in(&mut self, range: &CatalogRange) -> u32 {
        self.draw(range.lower(), range.upper())
    }
}

/// [`IdSource`] backed by a standard RNG.
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    /// Reproducible draws from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is set, otherwise from the operating system.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl IdSource for RandomIds {
    fn draw(&mut self, lower: u32, upper: u32) -> u32 {
        self.rng.random_range(lower..=upper)
    }
}
