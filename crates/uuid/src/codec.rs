//! Compact encodings of octet sequences.
//!
//! An octet sequence is re-based from base 256 into the encoding's base, padded to the fixed
//! width for its length, and written through an [`Alphabet`]. Decoding reverses this and
//! insists on the same fixed width, which is what makes leading zero octets recoverable.

use crate::alphabet::{Alphabet, Base64Alphabet, CjkAlphabet, WideAlphabet};
use crate::octets::{UuidOctets, UUID_OCTETS};
use crate::rfc4648::{rfc4648_to_uuid, uuid_to_rfc4648};
use crate::{UuidError, UuidResult};
use mbid_radix::{Converter, Radix};
use std::{fmt, str::FromStr};

/// Builds the octet → `base` converter, checking `base` against the alphabet.
fn converter_for<A: Alphabet + ?Sized>(base: u32, alphabet: &A) -> UuidResult<Converter> {
    let limit = alphabet.radix();
    if base > limit {
        return Err(UuidError::UnsupportedBase { base, limit });
    }
    Ok(Converter::new(Radix::OCTET, Radix::new(base)?))
}

/// Returns the fixed number of `base` digits used for `octet_len` octets.
///
/// For 16 octets this is 22 in base 64, 8 in base 65536 and 9 in base 20939.
pub fn encoded_len(octet_len: usize, base: u32) -> UuidResult<usize> {
    Ok(Converter::new(Radix::OCTET, Radix::new(base)?).max_digits(octet_len))
}

/// Encodes `octets` as `base` digits written through `alphabet`.
///
/// The output always has [`encoded_len`] characters; leading zero digits are kept.
///
/// # Errors
///
/// Returns [`UuidError::UnsupportedBase`] if `base` exceeds the alphabet's radix and
/// [`UuidError::Radix`] if `base` is below 2.
pub fn encode<A: Alphabet + ?Sized>(octets: &[u8], base: u32, alphabet: &A) -> UuidResult<String> {
    let converter = converter_for(base, alphabet)?;
    let digits: Vec<u32> = octets.iter().map(|&octet| u32::from(octet)).collect();
    let width = converter.max_digits(octets.len());

    converter
        .convert_fixed(&digits, width)?
        .into_iter()
        .map(|digit| {
            alphabet.to_char(digit).ok_or(UuidError::UnsupportedBase {
                base,
                limit: alphabet.radix(),
            })
        })
        .collect()
}

/// Decodes `text` written in `base` through `alphabet` back to `octet_len` octets.
///
/// # Errors
///
/// - [`UuidError::InvalidCharacter`] for a character outside the alphabet or whose digit is
///   not less than `base`
/// - [`UuidError::Length`] if `text` does not have exactly [`encoded_len`] characters
/// - [`UuidError::Radix`] if the value does not fit in `octet_len` octets
/// - [`UuidError::UnsupportedBase`] if `base` exceeds the alphabet's radix
pub fn decode<A: Alphabet + ?Sized>(
    text: &str,
    base: u32,
    alphabet: &A,
    octet_len: usize,
) -> UuidResult<Vec<u8>> {
    let converter = converter_for(base, alphabet)?.inverse();

    let digits = text
        .chars()
        .enumerate()
        .map(|(position, ch)| {
            alphabet
                .to_digit(ch)
                .filter(|&digit| digit < base)
                .ok_or(UuidError::InvalidCharacter { ch, position })
        })
        .collect::<UuidResult<Vec<u32>>>()?;

    let expected = converter.inverse().max_digits(octet_len);
    if digits.len() != expected {
        return Err(UuidError::Length {
            expected,
            actual: digits.len(),
        });
    }

    let octets = converter.convert_fixed(&digits, octet_len)?;
    // Base 256 digits always fit an octet.
    Ok(octets.into_iter().map(|digit| digit as u8).collect())
}

/// Encodes `octets` as raw 16-bit digits (UTF-16 code units, surrogates included).
pub fn encode_wide_units(octets: &[u8]) -> UuidResult<Vec<u16>> {
    let converter = converter_for(WideAlphabet.radix(), &WideAlphabet)?;
    let digits: Vec<u32> = octets.iter().map(|&octet| u32::from(octet)).collect();
    let width = converter.max_digits(octets.len());

    Ok(converter
        .convert_fixed(&digits, width)?
        .into_iter()
        .map(|digit| digit as u16)
        .collect())
}

/// Decodes raw 16-bit digits produced by [`encode_wide_units`].
pub fn decode_wide_units(units: &[u16], octet_len: usize) -> UuidResult<Vec<u8>> {
    let converter = converter_for(WideAlphabet.radix(), &WideAlphabet)?;
    let expected = converter.max_digits(octet_len);
    if units.len() != expected {
        return Err(UuidError::Length {
            expected,
            actual: units.len(),
        });
    }

    let digits: Vec<u32> = units.iter().map(|&unit| u32::from(unit)).collect();
    Ok(converter
        .inverse()
        .convert_fixed(&digits, octet_len)?
        .into_iter()
        .map(|digit| digit as u8)
        .collect())
}

/// The compact UUID forms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Encoding {
    /// Base 64, right-aligned digits, 22 characters.
    #[default]
    Base64,
    /// Base 65536, 8 characters.
    Wide,
    /// Base of the CJK range, 9 characters with the default range.
    Cjk,
    /// Byte-aligned RFC 4648 base64 without padding, 22 characters.
    #[cfg_attr(feature = "serde", serde(rename = "rfc4648"))]
    Base64Rfc4648,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [
        Encoding::Base64,
        Encoding::Wide,
        Encoding::Cjk,
        Encoding::Base64Rfc4648,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Base64 => "base64",
            Encoding::Wide => "wide",
            Encoding::Cjk => "cjk",
            Encoding::Base64Rfc4648 => "rfc4648",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|encoding| encoding.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                UuidError::Format(format!(
                    "unknown encoding '{}' (expected base64, wide, cjk or rfc4648)",
                    s
                ))
            })
    }
}

/// Encodes and decodes [`UuidOctets`] in every [`Encoding`].
///
/// Only the CJK alphabet is configurable; the others are fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UuidCodec {
    cjk: CjkAlphabet,
}

impl UuidCodec {
    pub fn new(cjk: CjkAlphabet) -> Self {
        Self { cjk }
    }

    pub fn cjk(&self) -> &CjkAlphabet {
        &self.cjk
    }

    /// Returns the length in characters of a UUID encoded with `encoding`.
    pub fn width(&self, encoding: Encoding) -> UuidResult<usize> {
        let base = match encoding {
            Encoding::Base64 | Encoding::Base64Rfc4648 => Base64Alphabet.radix(),
            Encoding::Wide => WideAlphabet.radix(),
            Encoding::Cjk => self.cjk.radix(),
        };
        encoded_len(UUID_OCTETS, base)
    }

    pub fn encode(&self, octets: &UuidOctets, encoding: Encoding) -> UuidResult<String> {
        let bytes = octets.as_bytes();
        match encoding {
            Encoding::Base64 => encode(bytes, Base64Alphabet.radix(), &Base64Alphabet),
            Encoding::Wide => encode(bytes, WideAlphabet.radix(), &WideAlphabet),
            Encoding::Cjk => encode(bytes, self.cjk.radix(), &self.cjk),
            Encoding::Base64Rfc4648 => Ok(uuid_to_rfc4648(octets)),
        }
    }

    pub fn decode(&self, text: &str, encoding: Encoding) -> UuidResult<UuidOctets> {
        let bytes = match encoding {
            Encoding::Base64 => decode(text, Base64Alphabet.radix(), &Base64Alphabet, UUID_OCTETS)?,
            Encoding::Wide => decode(text, WideAlphabet.radix(), &WideAlphabet, UUID_OCTETS)?,
            Encoding::Cjk => decode(text, self.cjk.radix(), &self.cjk, UUID_OCTETS)?,
            Encoding::Base64Rfc4648 => return rfc4648_to_uuid(text),
        };
        UuidOctets::try_from(bytes.as_slice())
    }
}
