//! Processor tag attached to every record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseProcessorError;

/// Which processing path handled a payment.
///
/// Occupies a single bit of the packed record, so only two variants can ever exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Processor {
    /// Primary path (bit cleared)
    #[default]
    Default,
    /// Secondary path (bit set)
    Fallback,
}

impl Processor {
    /// Both tags, in bit order
    pub const ALL: [Self; 2] = [Self::Default, Self::Fallback];

    /// Tag name as used on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fallback => "fallback",
        }
    }

    #[inline]
    pub(crate) const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback)
    }

    #[inline]
    pub(crate) const fn from_bit(fallback: bool) -> Self {
        if fallback {
            Self::Fallback
        } else {
            Self::Default
        }
    }
}

impl fmt::Display for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Processor {
    type Err = ParseProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "fallback" => Ok(Self::Fallback),
            other => Err(ParseProcessorError { tag: other.to_owned() }),
        }
    }
}
