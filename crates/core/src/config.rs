//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Core
//! code never reads environment variables itself: the binary reads them and hands the raw
//! values to [`CodecConfig::from_env_values`].

use crate::constants::{DEFAULT_CJK_HIGH, DEFAULT_CJK_LOW, DEFAULT_ENCODING};
use crate::{CoreError, CoreResult};
use mbid_uuid::{Alphabet, CjkAlphabet, Encoding, UuidCodec};
use serde::Serialize;

/// Codec configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    cjk: CjkAlphabet,
    default_encoding: Encoding,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            cjk: CjkAlphabet::default(),
            default_encoding: DEFAULT_ENCODING,
        }
    }
}

impl CodecConfig {
    /// Create a new `CodecConfig`.
    pub fn new(cjk: CjkAlphabet, default_encoding: Encoding) -> Self {
        Self {
            cjk,
            default_encoding,
        }
    }

    /// Build a `CodecConfig` from optional raw values (typically environment variables).
    ///
    /// Missing or blank values fall back to the defaults in [`crate::constants`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if a codepoint cannot be parsed or the range is not
    /// usable as an alphabet, and [`CoreError::UnknownEncoding`] for an unknown encoding name.
    pub fn from_env_values(
        cjk_low: Option<String>,
        cjk_high: Option<String>,
        encoding: Option<String>,
    ) -> CoreResult<Self> {
        let low = codepoint_from_env_value(cjk_low, DEFAULT_CJK_LOW)?;
        let high = codepoint_from_env_value(cjk_high, DEFAULT_CJK_HIGH)?;
        let cjk = CjkAlphabet::new(low, high)
            .map_err(|e| CoreError::InvalidConfig(format!("CJK range: {}", e)))?;
        let default_encoding = encoding_from_env_value(encoding)?;

        Ok(Self::new(cjk, default_encoding))
    }

    pub fn cjk(&self) -> &CjkAlphabet {
        &self.cjk
    }

    pub fn default_encoding(&self) -> Encoding {
        self.default_encoding
    }

    /// Returns the codec described by this configuration.
    pub fn codec(&self) -> UuidCodec {
        UuidCodec::new(self.cjk)
    }

    /// Returns a serialisable view of the configuration.
    pub fn summary(&self) -> CoreResult<ConfigSummary> {
        let codec = self.codec();
        Ok(ConfigSummary {
            cjk_low: format!("U+{:04X}", self.cjk.low()),
            cjk_high: format!("U+{:04X}", self.cjk.high()),
            cjk_base: self.cjk.radix(),
            cjk_width: codec.width(Encoding::Cjk)?,
            default_encoding: self.default_encoding,
        })
    }
}

/// Serialisable view of a [`CodecConfig`], as printed by `mbid config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub cjk_low: String,
    pub cjk_high: String,
    pub cjk_base: u32,
    pub cjk_width: usize,
    pub default_encoding: Encoding,
}

/// Parse a codepoint from an optional string value.
///
/// Accepts hex with an optional `U+` or `0x` prefix (`U+4E00`, `0x4e00`, `4E00`). If `value`
/// is `None` or empty/whitespace, returns `default`.
pub fn codepoint_from_env_value(value: Option<String>, default: u32) -> CoreResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(default);
    };

    let digits = ["U+", "u+", "0x", "0X"]
        .iter()
        .find_map(|prefix| value.strip_prefix(prefix))
        .unwrap_or(value.as_str());

    u32::from_str_radix(digits, 16).map_err(|e| {
        CoreError::InvalidConfig(format!("invalid codepoint '{}': {}", value, e))
    })
}

/// Parse the default encoding from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_ENCODING`].
pub fn encoding_from_env_value(value: Option<String>) -> CoreResult<Encoding> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value
        .map(|v| {
            v.parse::<Encoding>()
                .map_err(|_| CoreError::UnknownEncoding(v))
        })
        .transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_ENCODING))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CodecConfig::from_env_values(None, None, None).unwrap();
        assert_eq!(cfg, CodecConfig::default());
        assert_eq!(cfg.cjk().low(), 0x4E00);
        assert_eq!(cfg.cjk().high(), 0x9FCA);
        assert_eq!(cfg.default_encoding(), Encoding::Base64);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = CodecConfig::from_env_values(
            Some("  ".into()),
            Some(String::new()),
            Some(" ".into()),
        )
        .unwrap();
        assert_eq!(cfg, CodecConfig::default());
    }

    #[test]
    fn test_custom_values() {
        let cfg = CodecConfig::from_env_values(
            Some("U+3400".into()),
            Some("0x4dbf".into()),
            Some("cjk".into()),
        )
        .unwrap();
        assert_eq!(cfg.cjk().low(), 0x3400);
        assert_eq!(cfg.cjk().high(), 0x4DBF);
        assert_eq!(cfg.default_encoding(), Encoding::Cjk);
    }

    #[test]
    fn test_codepoint_prefixes() {
        assert_eq!(codepoint_from_env_value(Some("4E00".into()), 0).unwrap(), 0x4E00);
        assert_eq!(codepoint_from_env_value(Some("u+4e00".into()), 0).unwrap(), 0x4E00);
        assert_eq!(codepoint_from_env_value(Some("0X4E00".into()), 0).unwrap(), 0x4E00);
        assert_eq!(codepoint_from_env_value(None, 7).unwrap(), 7);
    }

    #[test]
    fn test_invalid_codepoint() {
        let result = codepoint_from_env_value(Some("U+XYZ".into()), 0);
        match result {
            Err(CoreError::InvalidConfig(msg)) => assert!(msg.contains("U+XYZ")),
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_range() {
        let result = CodecConfig::from_env_values(Some("9FCA".into()), Some("4E00".into()), None);
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_encoding() {
        let result = encoding_from_env_value(Some("base62".into()));
        match result {
            Err(CoreError::UnknownEncoding(name)) => assert_eq!(name, "base62"),
            other => panic!("Expected UnknownEncoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_summary() {
        let summary = CodecConfig::default().summary().unwrap();
        assert_eq!(summary.cjk_low, "U+4E00");
        assert_eq!(summary.cjk_high, "U+9FCA");
        assert_eq!(summary.cjk_base, 20939);
        assert_eq!(summary.cjk_width, 9);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["default_encoding"], "base64");
    }
}
