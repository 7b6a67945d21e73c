//! Constants used throughout the mbid core crate.

use mbid_uuid::Encoding;

/// Environment variable holding the first codepoint of the CJK alphabet.
pub const CJK_LOW_ENV: &str = "MBID_CJK_LOW";

/// Environment variable holding the last codepoint of the CJK alphabet.
pub const CJK_HIGH_ENV: &str = "MBID_CJK_HIGH";

/// Environment variable holding the default encoding name.
pub const ENCODING_ENV: &str = "MBID_ENCODING";

/// Default first codepoint of the CJK alphabet.
pub const DEFAULT_CJK_LOW: u32 = mbid_uuid::CJK_LOW;

/// Default last codepoint of the CJK alphabet.
pub const DEFAULT_CJK_HIGH: u32 = mbid_uuid::CJK_HIGH;

/// Encoding used when none is configured.
pub const DEFAULT_ENCODING: Encoding = Encoding::Base64;
