//! FormatSpecCache: two-tier precision -> spec string cache

use std::fmt;
use std::sync::Arc;

use fmtspec::specifier::build as build_spec;
use fmtspec::{CacheConfig, FormatFamily, Result};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Maps a decimal precision to a reusable format spec string such as `F2`
///
/// Precisions in `0..=common_threshold` come from a table built once at
/// construction, so repeated lookups return the same allocation without
/// locking. Higher precisions go through a small LRU guarded by one mutex.
///
/// Every `i32` is accepted: negatives become 0 and anything above
/// `max_precision` is clamped to it.
pub struct FormatSpecCache {
    /// Family prefix shared by every entry
    specifier: Box<str>,

    config: CacheConfig,

    /// Pre-built specs indexed by precision
    common: Box<[Arc<str>]>,

    /// Bounded specs for rarely used precisions
    uncommon: Mutex<LruCache<u32, Arc<str>>>,

    stats: CacheStats,
}

impl FormatSpecCache {
    /// Create a cache with the default configuration
    ///
    /// # Arguments
    /// * `specifier` - Family prefix, e.g. `"F"`
    pub fn new(specifier: &str) -> Self {
        Self::build(specifier, CacheConfig::default())
    }

    /// Create a cache for one of the built-in families
    pub fn for_family(family: FormatFamily) -> Self {
        Self::new(family.specifier())
    }

    /// Create a cache with a custom configuration
    ///
    /// # Arguments
    /// * `specifier` - Family prefix
    /// * `config` - Range and capacity settings
    ///
    /// # Returns
    /// * `Result<FormatSpecCache>` - `Error::InvalidConfig` if `config` is unusable
    pub fn with_config(specifier: &str, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(specifier, config))
    }

    fn build(specifier: &str, config: CacheConfig) -> Self {
        let common: Box<[Arc<str>]> = (0..=config.common_threshold)
            .map(|p| Arc::from(build_spec(specifier, p)))
            .collect();

        debug!(
            specifier,
            common_threshold = config.common_threshold,
            capacity = config.capacity,
            max_precision = config.max_precision,
            "format spec cache created"
        );

        Self {
            specifier: specifier.into(),
            config,
            common,
            uncommon: Mutex::new(LruCache::new(config.capacity)),
            stats: CacheStats::new(),
        }
    }

    /// Get the spec string for a precision
    ///
    /// # Arguments
    /// * `precision` - Requested fractional digits, any value
    ///
    /// # Returns
    /// * `Arc<str>` - `specifier` followed by the normalized precision
    pub fn get(&self, precision: i32) -> Arc<str> {
        let precision = self.config.normalize(precision);

        if self.config.is_common(precision) {
            self.stats.record_common_hit();
            return Arc::clone(&self.common[precision as usize]);
        }

        self.get_uncommon(precision)
    }

    fn get_uncommon(&self, precision: u32) -> Arc<str> {
        let mut uncommon = self.uncommon.lock();

        if let Some(spec) = uncommon.get(&precision) {
            self.stats.record_hit();
            return Arc::clone(spec);
        }

        self.stats.record_miss();
        let spec: Arc<str> = Arc::from(build_spec(&self.specifier, precision));
        let evicted = uncommon.put(precision, Arc::clone(&spec));
        drop(uncommon);

        trace!(specifier = %self.specifier, precision, "uncommon spec miss");
        if let Some((evicted, _)) = evicted {
            self.stats.record_eviction();
            trace!(specifier = %self.specifier, evicted, "uncommon spec evicted");
        }

        spec
    }

    /// Family prefix
    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    /// Active configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of uncommon entries currently held
    pub fn uncommon_len(&self) -> usize {
        self.uncommon.lock().len()
    }

    /// Whether `get(precision)` would be served without building a string
    ///
    /// Does not refresh recency.
    pub fn is_resident(&self, precision: i32) -> bool {
        let precision = self.config.normalize(precision);
        self.config.is_common(precision) || self.uncommon.lock().peek(&precision).is_some()
    }

    /// Uncommon precisions from most to least recently used
    pub fn resident_precisions(&self) -> Vec<u32> {
        self.uncommon.lock().keys().copied().collect()
    }

    /// Drop all uncommon entries and reset statistics
    ///
    /// The common table is left untouched.
    pub fn clear_uncommon(&self) {
        self.uncommon.lock().clear();
        self.stats.reset();
    }
}

impl fmt::Debug for FormatSpecCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let uncommon = self.uncommon.lock();
        f.debug_struct("FormatSpecCache")
            .field("specifier", &self.specifier)
            .field("config", &self.config)
            .field("uncommon_len", &uncommon.len())
            .field("uncommon_capacity", &uncommon.capacity())
            .finish()
    }
}
