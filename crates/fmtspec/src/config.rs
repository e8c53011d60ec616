//! Cache configuration and precision normalization

use crate::error::{Error, Result};

/// Default inclusive upper bound of the common precision range
pub const DEFAULT_COMMON_THRESHOLD: u32 = 5;

/// Default number of uncommon entries kept at once
pub const DEFAULT_CAPACITY: usize = 8;

/// Default highest representable precision
pub const DEFAULT_MAX_PRECISION: u32 = 28;

/// Highest `max_precision` a cache will accept
///
/// Bounds the eagerly built common table and the uncommon capacity.
pub const MAX_SUPPORTED_PRECISION: u32 = 99;

/// Tuning knobs for a format spec cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Precisions `0..=common_threshold` are pre-built and never evicted
    pub common_threshold: u32,

    /// Maximum number of uncommon entries
    pub capacity: usize,

    /// Requested precisions above this are clamped down to it
    pub max_precision: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            common_threshold: DEFAULT_COMMON_THRESHOLD,
            capacity: DEFAULT_CAPACITY,
            max_precision: DEFAULT_MAX_PRECISION,
        }
    }
}

impl CacheConfig {
    /// Set the common range upper bound
    pub fn with_common_threshold(mut self, common_threshold: u32) -> Self {
        self.common_threshold = common_threshold;
        self
    }

    /// Set the uncommon partition capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the clamp ceiling
    pub fn with_max_precision(mut self, max_precision: u32) -> Self {
        self.max_precision = max_precision;
        self
    }

    /// Check that the configuration describes a usable cache
    ///
    /// # Returns
    /// * `Result<()>` - `Error::InvalidConfig` if capacity is zero or larger
    ///   than the number of precisions, `max_precision` exceeds
    ///   [`MAX_SUPPORTED_PRECISION`], or the common range reaches past
    ///   `max_precision`
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig(
                "capacity must be greater than 0".to_string(),
            ));
        }
        if self.max_precision > MAX_SUPPORTED_PRECISION {
            return Err(Error::InvalidConfig(format!(
                "max_precision {} exceeds supported maximum {}",
                self.max_precision, MAX_SUPPORTED_PRECISION
            )));
        }
        if self.capacity > MAX_SUPPORTED_PRECISION as usize + 1 {
            return Err(Error::InvalidConfig(format!(
                "capacity {} exceeds supported maximum {}",
                self.capacity,
                MAX_SUPPORTED_PRECISION + 1
            )));
        }
        if self.common_threshold > self.max_precision {
            return Err(Error::InvalidConfig(format!(
                "common_threshold {} exceeds max_precision {}",
                self.common_threshold, self.max_precision
            )));
        }
        Ok(())
    }

    /// Map any requested precision onto `0..=max_precision`
    ///
    /// Negative values mean "no fractional digits" and become 0.
    #[inline]
    pub fn normalize(&self, precision: i32) -> u32 {
        if precision < 0 {
            0
        } else {
            (precision as u32).min(self.max_precision)
        }
    }

    /// Whether an already normalized precision falls in the common range
    #[inline]
    pub fn is_common(&self, normalized: u32) -> bool {
        normalized <= self.common_threshold
    }

    /// Number of uncommon precisions that can ever be requested
    ///
    /// 0 when the common range covers everything, validated or not.
    pub fn uncommon_span(&self) -> u32 {
        self.max_precision.saturating_sub(self.common_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = CacheConfig::default();
        assert_eq!(config.common_threshold, 5);
        assert_eq!(config.capacity, 8);
        assert_eq!(config.max_precision, 28);
        assert!(config.validate().is_ok());
        assert_eq!(config.uncommon_span(), 23);
    }

    #[test]
    fn test_normalize_negative() {
        let config = CacheConfig::default();
        assert_eq!(config.normalize(-1), 0);
        assert_eq!(config.normalize(-3), 0);
        assert_eq!(config.normalize(i32::MIN), 0);
    }

    #[test]
    fn test_normalize_clamps() {
        let config = CacheConfig::default();
        assert_eq!(config.normalize(28), 28);
        assert_eq!(config.normalize(29), 28);
        assert_eq!(config.normalize(100), 28);
        assert_eq!(config.normalize(i32::MAX), 28);
    }

    #[test]
    fn test_normalize_in_range() {
        let config = CacheConfig::default();
        for p in 0..=28 {
            assert_eq!(config.normalize(p), p as u32);
        }
    }

    #[test]
    fn test_is_common() {
        let config = CacheConfig::default();
        assert!(config.is_common(0));
        assert!(config.is_common(5));
        assert!(!config.is_common(6));
        assert!(!config.is_common(28));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = CacheConfig::default().with_capacity(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_threshold_past_max() {
        let config = CacheConfig::default()
            .with_common_threshold(10)
            .with_max_precision(9);
        assert!(config.validate().is_err());

        // Everything common is fine
        let config = CacheConfig::default()
            .with_common_threshold(9)
            .with_max_precision(9);
        assert!(config.validate().is_ok());
        assert_eq!(config.uncommon_span(), 0);
    }

    #[test]
    fn test_validate_rejects_oversized_range() {
        let config = CacheConfig::default()
            .with_common_threshold(u32::MAX - 1)
            .with_max_precision(u32::MAX);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = CacheConfig::default().with_max_precision(MAX_SUPPORTED_PRECISION + 1);
        assert!(config.validate().is_err());

        let config = CacheConfig::default()
            .with_common_threshold(MAX_SUPPORTED_PRECISION)
            .with_max_precision(MAX_SUPPORTED_PRECISION);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_capacity() {
        let config = CacheConfig::default().with_capacity(usize::MAX);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = CacheConfig::default().with_capacity(MAX_SUPPORTED_PRECISION as usize + 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_uncommon_span_unvalidated() {
        let config = CacheConfig::default()
            .with_common_threshold(10)
            .with_max_precision(5);
        assert!(config.validate().is_err());
        assert_eq!(config.uncommon_span(), 0);
    }
}
