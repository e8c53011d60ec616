//! Command handlers for fmtctl

use anyhow::{Context, Result};
use fmtcache::FormatSpecCache;
use fmtspec::{
    specifier, CacheConfig, FormatFamily, DEFAULT_CAPACITY, DEFAULT_COMMON_THRESHOLD,
    DEFAULT_MAX_PRECISION,
};
use serde::Serialize;
use std::io::Write;
use std::ops::Deref;
use tracing::{debug, warn};

/// Which cache a command runs against
#[derive(clap::Args, Debug)]
pub struct CacheArgs {
    /// Built-in family (fixed or percent); defaults to fixed
    #[arg(short, long, conflicts_with = "specifier")]
    pub family: Option<FormatFamily>,

    /// Custom specifier prefix; builds a private cache
    #[arg(short, long)]
    pub specifier: Option<String>,

    /// Uncommon LRU capacity
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Highest precision served from the pre-built table
    #[arg(long, default_value_t = DEFAULT_COMMON_THRESHOLD)]
    pub common_threshold: u32,

    /// Precisions above this are clamped
    #[arg(long, default_value_t = DEFAULT_MAX_PRECISION)]
    pub max_precision: u32,
}

/// Either a process-wide family cache or a private one
pub enum CacheHandle {
    Shared(&'static FormatSpecCache),
    Owned(FormatSpecCache),
}

impl Deref for CacheHandle {
    type Target = FormatSpecCache;

    fn deref(&self) -> &Self::Target {
        match self {
            CacheHandle::Shared(cache) => cache,
            CacheHandle::Owned(cache) => cache,
        }
    }
}

impl CacheArgs {
    fn config(&self) -> CacheConfig {
        CacheConfig::default()
            .with_capacity(self.capacity)
            .with_common_threshold(self.common_threshold)
            .with_max_precision(self.max_precision)
    }

    /// Pick the shared family cache when nothing is customized
    pub fn resolve(&self) -> Result<CacheHandle> {
        let config = self.config();
        let family = self.family.unwrap_or(FormatFamily::Fixed);

        if self.specifier.is_none() && config == CacheConfig::default() {
            debug!("Using shared {} cache", family);
            return Ok(CacheHandle::Shared(fmtcache::for_family(family)));
        }

        let specifier = self.specifier.as_deref().unwrap_or(family.specifier());
        let cache = FormatSpecCache::with_config(specifier, config)
            .with_context(|| format!("Failed to build cache for '{}'", specifier))?;
        Ok(CacheHandle::Owned(cache))
    }
}

/// Write one spec string per precision
pub fn run_get<W: Write>(cache: &FormatSpecCache, precisions: &[i32], out: &mut W) -> Result<()> {
    for &precision in precisions {
        let spec = cache.get(precision);
        writeln!(out, "{}", spec).context("Failed to write output")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ParsedSpec<'a> {
    input: &'a str,
    specifier: String,
    precision: Option<u32>,
    family: Option<&'static str>,
}

/// Parse each spec and write it as a JSON line
///
/// Every input is attempted; the first failure is returned at the end.
pub fn run_parse<W: Write>(specs: &[String], out: &mut W) -> Result<()> {
    let mut first_error = None;

    for input in specs {
        match specifier::parse(input.trim()) {
            Ok(spec) => {
                let family = FormatFamily::from_specifier(&spec.specifier).map(FormatFamily::name);
                let parsed = ParsedSpec {
                    input: input.as_str(),
                    specifier: spec.specifier,
                    precision: spec.precision,
                    family,
                };
                write_json(&parsed, out)?;
            }
            Err(e) => {
                warn!("Could not parse '{}': {}", input, e);
                if first_error.is_none() {
                    let err = anyhow::Error::new(e).context(format!("Invalid spec '{}'", input));
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Serialize a value as one JSON line
pub fn write_json<T: Serialize, W: Write>(value: &T, out: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out).context("Failed to write output")?;
    Ok(())
}
