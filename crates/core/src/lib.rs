//! # mbid core
//!
//! Service layer for compact UUID identifiers.
//!
//! This crate ties the codec crates to runtime configuration:
//! - [`CodecConfig`] resolved once at startup (CJK range, default encoding)
//! - [`CompactIdService`] working on UUID text and compact strings
//!
//! **No I/O concerns**: reading the environment and printing results belong in the `mbid`
//! binary.

pub mod config;
pub mod constants;
mod error;
mod service;

pub use config::{CodecConfig, ConfigSummary};
pub use error::{CoreError, CoreResult};
pub use service::{CompactIdService, GeneratedId};

// Re-export the codec types callers need alongside the service.
pub use mbid_uuid::{Encoding, UuidOctets};
