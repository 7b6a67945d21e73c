//! Compact identifier operations on UUID text.
//!
//! [`CompactIdService`] is the entry point used by the `mbid` binary. It works on strings at
//! both ends (hyphenated UUID text in, compact text out and the reverse) so callers never need
//! to handle octets directly.

use crate::config::CodecConfig;
use crate::{CoreError, CoreResult};
use mbid_radix::Converter;
use mbid_uuid::{
    rfc4648_to_uuid, Alphabet, Base64Alphabet, Encoding, UuidCodec, UuidOctets, WideAlphabet,
};
use serde::Serialize;
use std::sync::Arc;

/// A freshly generated identifier in both forms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedId {
    pub uuid: String,
    pub compact: String,
    pub encoding: Encoding,
}

/// Encodes, decodes and re-encodes compact UUID strings.
///
/// The service holds only immutable configuration, so it is cheap to clone and safe to share
/// between threads.
#[derive(Clone, Debug)]
pub struct CompactIdService {
    cfg: Arc<CodecConfig>,
    codec: UuidCodec,
}

impl Default for CompactIdService {
    fn default() -> Self {
        Self::new(Arc::new(CodecConfig::default()))
    }
}

impl CompactIdService {
    /// Creates a new service.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Codec configuration resolved at startup
    pub fn new(cfg: Arc<CodecConfig>) -> Self {
        let codec = cfg.codec();
        Self { cfg, codec }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.cfg
    }

    /// Encodes UUID text (hyphenated or bare hex) as `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Uuid`] if `uuid_text` is not a valid UUID.
    pub fn encode(&self, uuid_text: &str, encoding: Encoding) -> CoreResult<String> {
        let octets = UuidOctets::parse(uuid_text.trim())?;
        let compact = self.codec.encode(&octets, encoding)?;
        tracing::debug!("encoded {} as {}: {}", octets, encoding, compact);
        Ok(compact)
    }

    /// Encodes UUID text with the configured default encoding.
    pub fn encode_default(&self, uuid_text: &str) -> CoreResult<String> {
        self.encode(uuid_text, self.cfg.default_encoding())
    }

    /// Decodes a compact string to canonical hyphenated UUID text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Uuid`] if `compact` is not a valid `encoding` string.
    pub fn decode(&self, compact: &str, encoding: Encoding) -> CoreResult<String> {
        let octets = self.codec.decode(compact, encoding)?;
        tracing::debug!("decoded {} {} as {}", encoding, compact, octets);
        Ok(octets.to_string())
    }

    /// Detects the encoding of `compact` and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UndetectedEncoding`] if no encoding matches.
    pub fn decode_detect(&self, compact: &str) -> CoreResult<(Encoding, String)> {
        let encoding = self
            .detect(compact)
            .ok_or_else(|| CoreError::UndetectedEncoding(compact.to_string()))?;
        Ok((encoding, self.decode(compact, encoding)?))
    }

    /// Converts a compact string from one encoding to another.
    pub fn reencode(&self, compact: &str, from: Encoding, to: Encoding) -> CoreResult<String> {
        let octets = self.codec.decode(compact, from)?;
        Ok(self.codec.encode(&octets, to)?)
    }

    /// Generates a random (version 4) UUID and its compact form.
    pub fn generate(&self, encoding: Encoding) -> CoreResult<GeneratedId> {
        let octets = UuidOctets::new_v4();
        let compact = self.codec.encode(&octets, encoding)?;
        tracing::debug!("generated {}", octets);
        Ok(GeneratedId {
            uuid: octets.to_string(),
            compact,
            encoding,
        })
    }

    /// Identifies the encoding of a compact string from its length and characters.
    ///
    /// The CJK and wide forms are recognised by alphabet and width. A 22-character base64
    /// string may be valid in both base64 forms; the digit form ([`Encoding::Base64`]) wins
    /// unless only the RFC 4648 form decodes.
    pub fn detect(&self, compact: &str) -> Option<Encoding> {
        let len = compact.chars().count();
        let width = |encoding| self.codec.width(encoding).ok();

        if Some(len) == width(Encoding::Cjk) && all_in(compact, self.codec.cjk()) {
            return Some(Encoding::Cjk);
        }

        if Some(len) == width(Encoding::Base64) && all_in(compact, &Base64Alphabet) {
            let digits_ok = self.codec.decode(compact, Encoding::Base64).is_ok();
            let rfc_ok = rfc4648_to_uuid(compact).is_ok();
            return match (digits_ok, rfc_ok) {
                (true, true) => {
                    tracing::warn!(
                        "'{}' is valid in both base64 forms, assuming {}",
                        compact,
                        Encoding::Base64
                    );
                    Some(Encoding::Base64)
                }
                (true, false) => Some(Encoding::Base64),
                (false, true) => Some(Encoding::Base64Rfc4648),
                (false, false) => None,
            };
        }

        if Some(len) == width(Encoding::Wide) && all_in(compact, &WideAlphabet) {
            return Some(Encoding::Wide);
        }

        None
    }

    /// Converts raw digits between two bases, optionally to a fixed width.
    pub fn convert_digits(
        &self,
        digits: &[u32],
        from: u32,
        to: u32,
        width: Option<usize>,
    ) -> CoreResult<Vec<u32>> {
        let converter = Converter::from_bases(from, to)?;
        let mut steps = 0usize;
        let converted = converter.convert_traced(digits, width, &mut |step| {
            steps += 1;
            tracing::trace!("{:?}", step);
        })?;
        tracing::debug!(
            "converted {} base-{} digits to {} base-{} digits in {} steps",
            digits.len(),
            from,
            converted.len(),
            to,
            steps
        );
        Ok(converted)
    }
}

fn all_in(text: &str, alphabet: &dyn Alphabet) -> bool {
    text.chars().all(|c| alphabet.to_digit(c).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbid_uuid::CjkAlphabet;

    const JAY_ID: &str = "a223958d-5c56-4b2c-a30a-87e357bc121b";

    #[test]
    fn test_encode_decode_every_encoding() {
        let service = CompactIdService::default();
        for encoding in Encoding::ALL {
            let compact = service.encode(JAY_ID, encoding).unwrap();
            assert_eq!(service.decode(&compact, encoding).unwrap(), JAY_ID);
        }
    }

    #[test]
    fn test_encode_accepts_uppercase_and_bare_hex() {
        let service = CompactIdService::default();
        let expected = service.encode(JAY_ID, Encoding::Base64).unwrap();
        assert_eq!(
            service
                .encode("A223958D5C564B2CA30A87E357BC121B", Encoding::Base64)
                .unwrap(),
            expected
        );
        assert_eq!(expected, "CiI5WNXFZLLKMKh+NXvBIb");
    }

    #[test]
    fn test_encode_default_uses_config() {
        let cfg = CodecConfig::new(CjkAlphabet::default(), Encoding::Cjk);
        let service = CompactIdService::new(Arc::new(cfg));
        let compact = service.encode_default(JAY_ID).unwrap();
        assert_eq!(compact.chars().count(), 9);
        assert_eq!(service.config().default_encoding(), Encoding::Cjk);
    }

    #[test]
    fn test_encode_rejects_bad_uuid() {
        let service = CompactIdService::default();
        let result = service.encode("not-a-uuid", Encoding::Base64);
        assert!(matches!(result, Err(CoreError::Uuid(_))));
    }

    #[test]
    fn test_reencode() {
        let service = CompactIdService::default();
        let base64 = service.encode(JAY_ID, Encoding::Base64).unwrap();
        let cjk = service
            .reencode(&base64, Encoding::Base64, Encoding::Cjk)
            .unwrap();
        assert_eq!(cjk, service.encode(JAY_ID, Encoding::Cjk).unwrap());
        let rfc = service
            .reencode(&cjk, Encoding::Cjk, Encoding::Base64Rfc4648)
            .unwrap();
        assert_eq!(rfc, "oiOVjVxWSyyjCofjV7wSGw");
    }

    #[test]
    fn test_generate() {
        let service = CompactIdService::default();
        let generated = service.generate(Encoding::Wide).unwrap();
        assert_eq!(generated.encoding, Encoding::Wide);
        assert_eq!(generated.uuid.len(), 36);
        assert_eq!(
            service.decode(&generated.compact, Encoding::Wide).unwrap(),
            generated.uuid
        );
    }

    #[test]
    fn test_detect_cjk_and_wide() {
        let service = CompactIdService::default();
        let cjk = service.encode(JAY_ID, Encoding::Cjk).unwrap();
        let wide = service.encode(JAY_ID, Encoding::Wide).unwrap();
        assert_eq!(service.detect(&cjk), Some(Encoding::Cjk));
        assert_eq!(service.detect(&wide), Some(Encoding::Wide));
    }

    #[test]
    fn test_detect_base64_forms() {
        let service = CompactIdService::default();
        // Starts above 'D', so only valid as RFC 4648.
        assert_eq!(
            service.detect("oiOVjVxWSyyjCofjV7wSGw"),
            Some(Encoding::Base64Rfc4648)
        );
        // Ends in 'b', which leaves trailing bits set for RFC 4648.
        assert_eq!(
            service.detect("CiI5WNXFZLLKMKh+NXvBIb"),
            Some(Encoding::Base64)
        );
        // Valid both ways.
        assert_eq!(service.detect(&"A".repeat(22)), Some(Encoding::Base64));
    }

    #[test]
    fn test_detect_rejects_unknown() {
        let service = CompactIdService::default();
        assert_eq!(service.detect(""), None);
        assert_eq!(service.detect("short"), None);
        assert_eq!(service.detect(&"z".repeat(22)), None);

        let result = service.decode_detect("short");
        assert!(matches!(result, Err(CoreError::UndetectedEncoding(_))));
    }

    #[test]
    fn test_decode_detect() {
        let service = CompactIdService::default();
        let (encoding, uuid) = service.decode_detect("oiOVjVxWSyyjCofjV7wSGw").unwrap();
        assert_eq!(encoding, Encoding::Base64Rfc4648);
        assert_eq!(uuid, JAY_ID);
    }

    #[test]
    fn test_convert_digits() {
        let service = CompactIdService::default();
        let digits = service
            .convert_digits(&[0x10, 0x20, 0x30], 256, 20939, None)
            .unwrap();
        assert_eq!(digits, vec![50, 9866]);
        let back = service
            .convert_digits(&digits, 20939, 256, Some(3))
            .unwrap();
        assert_eq!(back, vec![0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_convert_digits_errors() {
        let service = CompactIdService::default();
        assert!(matches!(
            service.convert_digits(&[10], 10, 2, None),
            Err(CoreError::Radix(_))
        ));
        assert!(matches!(
            service.convert_digits(&[1], 1, 2, None),
            Err(CoreError::Radix(_))
        ));
    }

    #[test]
    fn test_generated_id_serialises() {
        let generated = GeneratedId {
            uuid: JAY_ID.into(),
            compact: "CiI5WNXFZLLKMKh+NXvBIb".into(),
            encoding: Encoding::Base64,
        };
        let json = serde_json::to_value(&generated).unwrap();
        assert_eq!(json["encoding"], "base64");
        assert_eq!(json["uuid"], JAY_ID);
    }
}
