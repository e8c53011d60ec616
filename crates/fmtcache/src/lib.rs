//! # fmtcache
//!
//! Thread-safe cache of numeric format spec strings (`F2`, `P12`, ...).
//!
//! ## Architecture
//! - **Common table**: precisions 0..=5 built once, lock-free, same `Arc` every call
//! - **Uncommon LRU**: precisions 6..=28 in an 8-entry LRU behind one mutex
//! - **Normalization**: negatives map to 0, anything above 28 clamps to 28
//!
//! ```
//! let spec = fmtcache::fixed().get(2);
//! assert_eq!(&*spec, "F2");
//! assert_eq!(&*fmtcache::percent().get(100), "P28");
//! ```

#![warn(missing_docs)]

mod cache;
mod global;
mod lru;
mod stats;

pub use cache::FormatSpecCache;
pub use global::{fixed, for_family, percent};
pub use stats::{CacheStats, StatsSnapshot};

pub use fmtspec::{CacheConfig, FormatFamily};
