//! Format families and their specifier prefixes

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A family of numeric formats sharing one specifier prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatFamily {
    /// Fixed-point, e.g. `F2` renders `3.14`
    Fixed,
    /// Percentage, e.g. `P1` renders `12.5 %`
    Percent,
}

impl FormatFamily {
    /// Every supported family
    pub const ALL: [FormatFamily; 2] = [FormatFamily::Fixed, FormatFamily::Percent];

    /// Specifier prefix placed before the precision digits
    pub fn specifier(self) -> &'static str {
        match self {
            FormatFamily::Fixed => "F",
            FormatFamily::Percent => "P",
        }
    }

    /// Lowercase family name
    pub fn name(self) -> &'static str {
        match self {
            FormatFamily::Fixed => "fixed",
            FormatFamily::Percent => "percent",
        }
    }

    /// Family owning a specifier prefix, if any
    pub fn from_specifier(specifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.specifier() == specifier)
    }
}

impl fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" | "f" => Ok(FormatFamily::Fixed),
            "percent" | "p" => Ok(FormatFamily::Percent),
            _ => Err(Error::UnknownFamily(s.to_string())),
        }
    }
}
