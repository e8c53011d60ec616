//! Process-wide caches, one per format family
//!
//! Each family gets its own [`FormatSpecCache`] built on first use with the
//! default configuration. The caches share nothing: separate locks and
//! separate uncommon partitions.

use std::sync::LazyLock;

use fmtspec::FormatFamily;

use crate::cache::FormatSpecCache;

static FIXED: LazyLock<FormatSpecCache> =
    LazyLock::new(|| FormatSpecCache::for_family(FormatFamily::Fixed));

static PERCENT: LazyLock<FormatSpecCache> =
    LazyLock::new(|| FormatSpecCache::for_family(FormatFamily::Percent));

/// Shared cache for fixed-point specs (`F0`, `F1`, ...)
pub fn fixed() -> &'static FormatSpecCache {
    &FIXED
}

/// Shared cache for percentage specs (`P0`, `P1`, ...)
pub fn percent() -> &'static FormatSpecCache {
    &PERCENT
}

/// Shared cache for a family
pub fn for_family(family: FormatFamily) -> &'static FormatSpecCache {
    match family {
        FormatFamily::Fixed => fixed(),
        FormatFamily::Percent => percent(),
    }
}
