//! UUID octets and compact UUID encodings.
//!
//! A UUID is held as 16 big-endian octets ([`UuidOctets`]). From there it can be written as
//! canonical hyphenated text, or re-based into one of several compact forms suitable for URLs
//! and storage keys.
//!
//! ## Canonical text form
//! - Output: 36 characters, lowercase hex, 8-4-4-4-12 groups
//! - Example: `a223958d-5c56-4b2c-a30a-87e357bc121b`
//! - Input: the hyphenated form or the bare 32 hex digits, in either case
//!
//! ## Compact forms
//! The 16 octets are treated as one base-256 number and re-based with [`mbid_radix`]. The
//! resulting digits are written through an [`Alphabet`]:
//!
//! | Encoding | Base | Characters | Width |
//! |---|---|---|---|
//! | [`Encoding::Base64`] | 64 | `A-Z a-z 0-9 + /` | 22 |
//! | [`Encoding::Wide`] | 65536 | one codepoint per 16-bit digit | 8 |
//! | [`Encoding::Cjk`] | 20939 | `U+4E00..=U+9FCA` by default | 9 |
//!
//! Widths are fixed: leading zero digits are always written, so a compact string can be decoded
//! back to exactly 16 octets.
//!
//! [`Encoding::Base64Rfc4648`] is the byte-aligned RFC 4648 base64 form (trailing `==`
//! dropped). It uses the same alphabet as [`Encoding::Base64`] but different bit alignment, so
//! the two produce different strings for the same UUID.

mod alphabet;
mod codec;
mod octets;
mod rfc4648;

pub use alphabet::{Alphabet, Base64Alphabet, CjkAlphabet, WideAlphabet, CJK_HIGH, CJK_LOW};
pub use codec::{
    decode, decode_wide_units, encode, encode_wide_units, encoded_len, Encoding, UuidCodec,
};
pub use octets::{format_uuid, parse_uuid, UuidOctets, UUID_OCTETS};
pub use rfc4648::{rfc4648_to_uuid, uuid_to_rfc4648, RFC4648_LEN};

/// Re-exported for convenience.
pub use ::uuid::Uuid;
pub use mbid_radix::RadixError;

/// Error type for UUID operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UuidError {
    /// UUID text is not 32 hex digits with optional canonical hyphens
    #[error("Invalid UUID format: {0}")]
    Format(String),

    /// A sequence did not have the required number of elements
    #[error("Invalid length: expected {expected}, got {actual}")]
    Length { expected: usize, actual: usize },

    /// Digit conversion failed (invalid digit, invalid base or fixed-width overflow)
    #[error("Conversion error: {0}")]
    Radix(#[from] RadixError),

    /// An encoded string contained a character outside the alphabet
    #[error("Invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// The requested base is larger than the alphabet can represent
    #[error("Unsupported base {base}: alphabet holds at most {limit} digits")]
    UnsupportedBase { base: u32, limit: u32 },

    /// A codepoint range cannot be used as an alphabet
    #[error("Invalid codepoint range U+{low:04X}..=U+{high:04X}")]
    InvalidRange { low: u32, high: u32 },
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
