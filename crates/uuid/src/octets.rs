//! UUID text ⇄ octet conversion.
//!
//! This module contains the canonical in-memory form of a UUID value and its hyphenated text
//! representation.

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Number of octets in a UUID.
pub const UUID_OCTETS: usize = 16;

/// Byte offsets of the hyphens in the 36-character form.
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Octet boundaries of the 8-4-4-4-12 hex groups.
const GROUPS: [(usize, usize); 5] = [(0, 4), (4, 6), (6, 8), (8, 10), (10, 16)];

/// A UUID value as 16 big-endian octets.
///
/// Index 0 is the most significant octet. The value carries no version or variant checks: any
/// 16 octets are a valid `UuidOctets`.
///
/// # Construction
/// - [`UuidOctets::parse`] (or [`str::parse`]) reads hyphenated or bare hex text.
/// - [`UuidOctets::from_bytes`] wraps raw octets.
/// - [`UuidOctets::new_v4`] generates a random identifier.
///
/// # Display format
/// Always the canonical 36-character lowercase hyphenated form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UuidOctets([u8; UUID_OCTETS]);

impl UuidOctets {
    /// The all-zero UUID.
    pub const NIL: UuidOctets = UuidOctets([0; UUID_OCTETS]);

    /// The all-`ff` UUID.
    pub const MAX: UuidOctets = UuidOctets([0xff; UUID_OCTETS]);

    pub const fn from_bytes(bytes: [u8; UUID_OCTETS]) -> Self {
        Self(bytes)
    }

    /// Generates a random (version 4) UUID.
    pub fn new_v4() -> Self {
        Self::from(Uuid::new_v4())
    }

    /// Parses UUID text. See [`parse_uuid`].
    pub fn parse(text: &str) -> UuidResult<Self> {
        parse_uuid(text)
    }

    pub fn as_bytes(&self) -> &[u8; UUID_OCTETS] {
        &self.0
    }

    /// Returns the octets as base-256 digits, most significant first.
    pub fn to_digits(&self) -> Vec<u32> {
        self.0.iter().map(|&octet| u32::from(octet)).collect()
    }

    /// Returns the canonical hyphenated lowercase text.
    pub fn hyphenated(&self) -> String {
        GROUPS
            .iter()
            .map(|&(start, end)| hex::encode(&self.0[start..end]))
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Parses UUID text into 16 octets.
///
/// Accepted forms, hex digits in either case:
/// - `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` (hyphens at all four canonical positions)
/// - `xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx` (32 hex digits, no hyphens)
///
/// # Errors
///
/// Returns [`UuidError::Format`] for any other input, including partially hyphenated text.
pub fn parse_uuid(text: &str) -> UuidResult<UuidOctets> {
    let bytes = text.as_bytes();

    let hex_digits: Vec<u8> = match bytes.len() {
        32 => bytes.to_vec(),
        36 if HYPHEN_POSITIONS.iter().all(|&i| bytes[i] == b'-') => bytes
            .iter()
            .enumerate()
            .filter(|(i, _)| !HYPHEN_POSITIONS.contains(i))
            .map(|(_, &b)| b)
            .collect(),
        _ => {
            return Err(UuidError::Format(format!(
                "UUID must be 32 hex digits, optionally hyphenated as 8-4-4-4-12, got: '{}'",
                text
            )))
        }
    };

    let mut octets = [0u8; UUID_OCTETS];
    hex::decode_to_slice(&hex_digits, &mut octets).map_err(|e| {
        UuidError::Format(format!("UUID contains non-hex characters ({}): '{}'", e, text))
    })?;

    Ok(UuidOctets(octets))
}

/// Formats 16 octets as canonical hyphenated lowercase UUID text.
///
/// # Errors
///
/// Returns [`UuidError::Length`] unless `octets` holds exactly 16 elements.
pub fn format_uuid(octets: &[u8]) -> UuidResult<String> {
    Ok(UuidOctets::try_from(octets)?.hyphenated())
}

impl fmt::Display for UuidOctets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hyphenated())
    }
}

impl FromStr for UuidOctets {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uuid(s)
    }
}

impl TryFrom<&[u8]> for UuidOctets {
    type Error = UuidError;

    fn try_from(octets: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; UUID_OCTETS] = octets.try_into().map_err(|_| UuidError::Length {
            expected: UUID_OCTETS,
            actual: octets.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl From<Uuid> for UuidOctets {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.into_bytes())
    }
}

impl From<UuidOctets> for Uuid {
    fn from(octets: UuidOctets) -> Self {
        Uuid::from_bytes(octets.0)
    }
}

impl AsRef<[u8]> for UuidOctets {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UuidOctets {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.hyphenated())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UuidOctets {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_uuid(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const JAY_ID: &str = "a223958d-5c56-4b2c-a30a-87e357bc121b";
    const JAY_OCTETS: [u8; 16] = [
        0xa2, 0x23, 0x95, 0x8d, 0x5c, 0x56, 0x4b, 0x2c, 0xa3, 0x0a, 0x87, 0xe3, 0x57, 0xbc, 0x12,
        0x1b,
    ];

    #[test]
    fn test_parse_hyphenated() {
        let octets = parse_uuid(JAY_ID).unwrap();
        assert_eq!(octets.as_bytes(), &JAY_OCTETS);
    }

    #[test]
    fn test_parse_bare_hex() {
        let octets = parse_uuid("a223958d5c564b2ca30a87e357bc121b").unwrap();
        assert_eq!(octets.as_bytes(), &JAY_OCTETS);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let upper = parse_uuid("A223958D-5C56-4B2C-A30A-87E357BC121B").unwrap();
        let mixed = parse_uuid("a223958D-5c56-4B2c-a30A-87e357Bc121b").unwrap();
        assert_eq!(upper.as_bytes(), &JAY_OCTETS);
        assert_eq!(mixed, upper);
    }

    #[test]
    fn test_parse_rejects_misplaced_hyphens() {
        let result = parse_uuid("a223958d5-c56-4b2c-a30a-87e357bc121b");
        match result {
            Err(UuidError::Format(msg)) => assert!(msg.contains("8-4-4-4-12")),
            other => panic!("Expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_partial_hyphens() {
        assert!(parse_uuid("a223958d-5c564b2ca30a87e357bc121b").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(parse_uuid("").is_err());
        assert!(parse_uuid("a223958d-5c56-4b2c-a30a-87e357bc121").is_err());
        assert!(parse_uuid("a223958d-5c56-4b2c-a30a-87e357bc121bb").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let result = parse_uuid("a223958d-5c56-4b2c-a30a-87e357bc12zz");
        match result {
            Err(UuidError::Format(msg)) => assert!(msg.contains("non-hex")),
            other => panic!("Expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_multibyte_text() {
        // 36 bytes with hyphens in the right places, but not hex
        assert!(parse_uuid("a223958d-5c56-4b2c-a30a-87e357bc12é").is_err());
    }

    #[test]
    fn test_format_inserts_hyphens() {
        assert_eq!(format_uuid(&JAY_OCTETS).unwrap(), JAY_ID);
        assert_eq!(
            format_uuid(&[0u8; 16]).unwrap(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            format_uuid(&[0xffu8; 16]).unwrap(),
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
    }

    #[test]
    fn test_format_requires_sixteen_octets() {
        assert_eq!(
            format_uuid(&[0u8; 15]),
            Err(UuidError::Length {
                expected: 16,
                actual: 15
            })
        );
        assert_eq!(
            format_uuid(&[]),
            Err(UuidError::Length {
                expected: 16,
                actual: 0
            })
        );
    }

    #[test]
    fn test_format_lowercases_parsed_text() {
        let octets = parse_uuid("E73ED332-BBDE-4D69-87A9-250627AE0E29").unwrap();
        assert_eq!(octets.to_string(), "e73ed332-bbde-4d69-87a9-250627ae0e29");
    }

    #[test]
    fn test_from_str_and_display() {
        let octets: UuidOctets = JAY_ID.parse().unwrap();
        assert_eq!(format!("{}", octets), JAY_ID);
    }

    #[test]
    fn test_uuid_interop() {
        let uuid = Uuid::parse_str(JAY_ID).unwrap();
        let octets = UuidOctets::from(uuid);
        assert_eq!(octets.as_bytes(), &JAY_OCTETS);
        assert_eq!(Uuid::from(octets), uuid);
        assert_eq!(octets.to_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn test_new_v4_is_version_four() {
        let octets = UuidOctets::new_v4();
        assert_eq!(Uuid::from(octets).get_version_num(), 4);
        assert_ne!(octets, UuidOctets::new_v4());
    }

    #[test]
    fn test_to_digits() {
        let digits = UuidOctets::from_bytes(JAY_OCTETS).to_digits();
        assert_eq!(digits.len(), 16);
        assert_eq!(digits[0], 0xa2);
        assert_eq!(digits[15], 0x1b);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let octets = UuidOctets::from_bytes(JAY_OCTETS);
        let json = serde_json::to_string(&octets).unwrap();
        assert_eq!(json, format!("\"{}\"", JAY_ID));
        let back: UuidOctets = serde_json::from_str(&json).unwrap();
        assert_eq!(back, octets);
        assert!(serde_json::from_str::<UuidOctets>("\"not-a-uuid\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_parse_format_round_trip(bytes in any::<[u8; 16]>()) {
            let text = format_uuid(&bytes).unwrap();
            prop_assert_eq!(text.len(), 36);
            let parsed = parse_uuid(&text).unwrap();
            prop_assert_eq!(parsed.as_bytes(), &bytes);
        }

        #[test]
        fn prop_format_of_parse_is_lowercase(bytes in any::<[u8; 16]>()) {
            let upper = format_uuid(&bytes).unwrap().to_uppercase();
            let parsed = parse_uuid(&upper).unwrap();
            prop_assert_eq!(parsed.to_string(), upper.to_lowercase());
        }
    }
}
