//! Arbitrary-base positional number conversion.
//!
//! A digit sequence is an unsigned integer written most-significant digit first, each digit
//! strictly less than the sequence's base. This crate re-expresses such a sequence in another
//! base without ever materialising the integer itself: destination digits are built up one
//! source digit at a time with a bounded accumulator (see [`Converter`]).
//!
//! ## Bases
//! - Any base from 2 up to `u32::MAX` is accepted ([`Radix`]).
//! - The accumulator never exceeds `src_base * dst_base`, so a `u64` is always enough.
//!
//! ## Output length
//! - [`convert`] returns the minimal representation (no leading zero digits). A non-empty
//!   input whose value is zero yields a single `0` digit; an empty input yields an empty output.
//! - Converting to the same base is the identity: digits are validated and copied as-is.
//! - [`convert_fixed`] returns exactly the requested number of digits, left-padded with zeros.
//!   This is how leading zero octets are recovered when decoding a fixed-width value.
//!
//! ## Example
//! ```
//! use mbid_radix::{convert, convert_fixed};
//!
//! let digits = convert(&[0x10, 0x20, 0x30], 256, 20939)?;
//! assert_eq!(digits, vec![50, 9866]);
//! assert_eq!(convert_fixed(&digits, 20939, 256, 3)?, vec![0x10, 0x20, 0x30]);
//! # Ok::<(), mbid_radix::RadixError>(())
//! ```

mod convert;
mod radix;

pub use convert::{convert, convert_fixed, max_digits, max_fixed_len, Converter, Step};
pub use radix::Radix;

/// Error type for digit conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RadixError {
    /// Bases must be at least 2
    #[error("Invalid base {0}: a base must be at least 2")]
    InvalidBase(u32),

    /// A digit was not strictly less than its declared base
    #[error("Invalid digit {digit} at position {position}: must be less than base {base}")]
    InvalidDigit {
        digit: u32,
        base: u32,
        position: usize,
    },

    /// The value does not fit in the requested fixed number of digits
    #[error("Value does not fit in {len} digits")]
    Overflow { len: usize },

    /// A fixed width was requested that no value of the source length could need
    #[error("Fixed width {len} exceeds the limit of {limit} digits for this input")]
    WidthTooLarge { len: usize, limit: usize },
}

/// Result type for digit conversion.
pub type RadixResult<T> = Result<T, RadixError>;
