//! # fmtspec
//!
//! Shared vocabulary for numeric format specifiers.
//!
//! ## Contents
//! - **FormatFamily**: fixed-point (`F`) and percentage (`P`) prefixes
//! - **CacheConfig**: common range, uncommon capacity, clamp ceiling
//! - **Spec strings**: build `F12` from a prefix and precision, parse it back
//!
//! The cache itself lives in `fmtcache`.

#![warn(missing_docs)]

mod config;
mod error;
mod family;
pub mod specifier;

pub use config::{
    CacheConfig, DEFAULT_CAPACITY, DEFAULT_COMMON_THRESHOLD, DEFAULT_MAX_PRECISION,
    MAX_SUPPORTED_PRECISION,
};
pub use error::{Error, Result};
pub use family::FormatFamily;
pub use specifier::FormatSpec;
