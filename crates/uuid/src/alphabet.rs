//! Digit ⇄ character tables for compact encodings.

use crate::{UuidError, UuidResult};

/// A bidirectional mapping between digit values and characters.
///
/// An alphabet with radix `n` maps every digit in `0..n` to a distinct character and back.
/// Encodings may use any base up to the alphabet's radix.
pub trait Alphabet {
    /// Number of distinct digits this alphabet can represent.
    fn radix(&self) -> u32;

    /// Returns the character for `digit`, or `None` if the digit is out of range.
    fn to_char(&self, digit: u32) -> Option<char>;

    /// Returns the digit for `ch`, or `None` if `ch` is not part of the alphabet.
    fn to_digit(&self, ch: char) -> Option<u32>;
}

const BASE64_TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// The standard base64 alphabet (`A-Z a-z 0-9 + /`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base64Alphabet;

impl Alphabet for Base64Alphabet {
    fn radix(&self) -> u32 {
        64
    }

    fn to_char(&self, digit: u32) -> Option<char> {
        let index = usize::try_from(digit).ok()?;
        BASE64_TABLE.get(index).map(|&b| char::from(b))
    }

    fn to_digit(&self, ch: char) -> Option<u32> {
        let code = u32::from(ch);
        match ch {
            'A'..='Z' => Some(code - u32::from('A')),
            'a'..='z' => Some(code - u32::from('a') + 26),
            '0'..='9' => Some(code - u32::from('0') + 52),
            '+' => Some(62),
            '/' => Some(63),
            _ => None,
        }
    }
}

const SURROGATE_LOW: u32 = 0xD800;
const SURROGATE_HIGH: u32 = 0xDFFF;

/// Offset that moves surrogate digits to `U+10000..=U+107FF`.
const SURROGATE_SHIFT: u32 = 0x1_0000 - SURROGATE_LOW;

/// One character per 16-bit digit.
///
/// Digits map to the codepoint of the same value, except the UTF-16 surrogate range
/// (`0xD800..=0xDFFF`), which has no `char` and is moved to `U+10000..=U+107FF`.
/// Use [`encode_wide_units`](crate::encode_wide_units) for the raw 16-bit values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WideAlphabet;

impl Alphabet for WideAlphabet {
    fn radix(&self) -> u32 {
        0x1_0000
    }

    fn to_char(&self, digit: u32) -> Option<char> {
        match digit {
            SURROGATE_LOW..=SURROGATE_HIGH => char::from_u32(digit + SURROGATE_SHIFT),
            0..=0xFFFF => char::from_u32(digit),
            _ => None,
        }
    }

    fn to_digit(&self, ch: char) -> Option<u32> {
        match u32::from(ch) {
            code @ 0..=0xFFFF => Some(code),
            code @ 0x1_0000..=0x1_07FF => Some(code - SURROGATE_SHIFT),
            _ => None,
        }
    }
}

/// Default first codepoint of the CJK alphabet (U+4E00).
pub const CJK_LOW: u32 = 0x4E00;

/// Default last codepoint of the CJK alphabet (U+9FCA).
pub const CJK_HIGH: u32 = 0x9FCA;

/// A contiguous codepoint range used as an alphabet; digit `d` is codepoint `low + d`.
///
/// The default range is the CJK Unified Ideographs block `U+4E00..=U+9FCA` (20939 digits).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CjkAlphabet {
    low: u32,
    high: u32,
}

impl Default for CjkAlphabet {
    fn default() -> Self {
        Self {
            low: CJK_LOW,
            high: CJK_HIGH,
        }
    }
}

impl CjkAlphabet {
    /// Creates an alphabet over `low..=high`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidRange`] if the range holds fewer than two codepoints,
    /// extends past `U+10FFFF`, or overlaps the surrogate range.
    pub fn new(low: u32, high: u32) -> UuidResult<Self> {
        let invalid = low >= high
            || high > u32::from(char::MAX)
            || (low <= SURROGATE_HIGH && high >= SURROGATE_LOW);
        if invalid {
            return Err(UuidError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }
}

impl Alphabet for CjkAlphabet {
    fn radix(&self) -> u32 {
        self.high - self.low + 1
    }

    fn to_char(&self, digit: u32) -> Option<char> {
        if digit >= self.radix() {
            return None;
        }
        char::from_u32(self.low + digit)
    }

    fn to_digit(&self, ch: char) -> Option<u32> {
        let code = u32::from(ch);
        (self.low..=self.high)
            .contains(&code)
            .then(|| code - self.low)
    }
}
