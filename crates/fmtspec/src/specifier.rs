//! Format spec strings using nom
//!
//! Spec string format:
//! ```text
//! <letters>[<decimal digits>]
//! ```
//! e.g. `F2`, `P12`, `F`. The letters name the family, the digits give the
//! number of fractional digits.

use nom::{
    character::complete::{alpha1, digit1},
    combinator::{all_consuming, map_res, opt},
    sequence::pair,
    IResult,
};
use std::fmt;

use crate::error::Result;

/// A parsed format spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    /// Family prefix, e.g. `F`
    pub specifier: String,
    /// Fractional digits, absent for a bare prefix
    pub precision: Option<u32>,
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.specifier)?;
        if let Some(precision) = self.precision {
            write!(f, "{}", precision)?;
        }
        Ok(())
    }
}

/// Build the spec string for a specifier and precision
///
/// The result is the specifier followed by the decimal digits of
/// `precision`, so it is never empty.
pub fn build(specifier: &str, precision: u32) -> String {
    format!("{}{}", specifier, precision)
}

fn spec_parts(input: &str) -> IResult<&str, (&str, Option<u32>)> {
    pair(alpha1, opt(map_res(digit1, str::parse::<u32>)))(input)
}

/// Parse a complete spec string
///
/// # Arguments
/// * `input` - Spec text such as `F12`
///
/// # Returns
/// * `Result<FormatSpec>` - `Error::Parse` on trailing input, a missing
///   prefix, or digits that overflow `u32`
pub fn parse(input: &str) -> Result<FormatSpec> {
    let (_, (specifier, precision)) = all_consuming(spec_parts)(input)?;
    Ok(FormatSpec {
        specifier: specifier.to_string(),
        precision,
    })
}
