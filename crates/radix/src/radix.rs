use crate::{RadixError, RadixResult};
use std::fmt;

/// A validated positional base (2 or greater).
///
/// Wrapping the raw `u32` means a [`Radix`] can be passed around without re-checking it.
/// Base 1 (unary) and base 0 are rejected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Radix(u32);

impl Radix {
    /// Base 2.
    pub const BINARY: Radix = Radix(2);

    /// Base 256, the base of an octet sequence.
    pub const OCTET: Radix = Radix(256);

    /// Creates a new `Radix`.
    ///
    /// # Errors
    ///
    /// Returns [`RadixError::InvalidBase`] if `base` is less than 2.
    pub fn new(base: u32) -> RadixResult<Self> {
        if base < 2 {
            return Err(RadixError::InvalidBase(base));
        }
        Ok(Self(base))
    }

    /// Returns the base as a plain integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns true if `digit` is a valid digit in this base.
    pub fn contains(self, digit: u32) -> bool {
        digit < self.0
    }

    /// Returns the largest digit of this base.
    pub fn max_digit(self) -> u32 {
        self.0 - 1
    }
}

impl TryFrom<u32> for Radix {
    type Error = RadixError;

    fn try_from(base: u32) -> Result<Self, Self::Error> {
        Radix::new(base)
    }
}

impl From<Radix> for u32 {
    fn from(radix: Radix) -> Self {
        radix.0
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
