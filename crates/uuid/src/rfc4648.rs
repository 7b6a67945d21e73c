//! Byte-aligned base64 (RFC 4648) form of a UUID.
//!
//! 16 octets are 128 bits, which standard base64 writes as 22 characters plus `==`. The padding
//! carries no information for a fixed 16-octet value, so it is dropped on output and refused on
//! input.

use crate::alphabet::{Alphabet, Base64Alphabet};
use crate::octets::UuidOctets;
use crate::{UuidError, UuidResult};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::{DecodeError, Engine as _};

/// Length of the unpadded RFC 4648 form of a UUID.
pub const RFC4648_LEN: usize = 22;

/// Encodes a UUID as 22 characters of unpadded standard base64.
pub fn uuid_to_rfc4648(octets: &UuidOctets) -> String {
    STANDARD_NO_PAD.encode(octets.as_bytes())
}

/// Decodes 22 characters of unpadded standard base64 into a UUID.
///
/// # Errors
///
/// - [`UuidError::Length`] unless `text` is exactly 22 characters
/// - [`UuidError::InvalidCharacter`] for a character outside the base64 alphabet
/// - [`UuidError::Format`] if the unused low bits of the last character are not zero
pub fn rfc4648_to_uuid(text: &str) -> UuidResult<UuidOctets> {
    let actual = text.chars().count();
    if actual != RFC4648_LEN {
        return Err(UuidError::Length {
            expected: RFC4648_LEN,
            actual,
        });
    }

    if let Some((position, ch)) = text
        .chars()
        .enumerate()
        .find(|&(_, ch)| Base64Alphabet.to_digit(ch).is_none())
    {
        return Err(UuidError::InvalidCharacter { ch, position });
    }

    // Every character is in the alphabet, so only the trailing bits can still be wrong.
    let bytes = STANDARD_NO_PAD.decode(text).map_err(|e| match e {
        DecodeError::InvalidLastSymbol(_, _) => UuidError::Format(format!(
            "base64 UUID has non-zero trailing bits: '{}'",
            text
        )),
        other => UuidError::Format(format!("invalid base64 UUID '{}': {}", text, other)),
    })?;

    UuidOctets::try_from(bytes.as_slice())
}
