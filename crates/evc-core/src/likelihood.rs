//! Likelihood ratings
//!
//! The catalog rates how certain the historical record is that a species grew
//! in a vegetation type. Only five values are meaningful; everything else in
//! a likelihood column is treated as "not present".

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Confidence that a species historically occurred in a vegetation type
///
/// Variants are declared in rank order, most certain first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LikelihoodCode {
    #[serde(rename = "-")]
    Certain,
    #[serde(rename = "3.2")]
    HighlyLikelyProminent,
    #[serde(rename = "3.1")]
    HighlyLikely,
    #[serde(rename = "2.2")]
    QuiteLikelyProminent,
    #[serde(rename = "2.1")]
    QuiteLikely,
}

/// Rank given to anything that is not a valid likelihood code
pub const UNRANKED: u8 = 5;

impl LikelihoodCode {
    /// All codes in rank order
    pub const ALL: [LikelihoodCode; 5] = [
        LikelihoodCode::Certain,
        LikelihoodCode::HighlyLikelyProminent,
        LikelihoodCode::HighlyLikely,
        LikelihoodCode::QuiteLikelyProminent,
        LikelihoodCode::QuiteLikely,
    ];

    /// Parse the catalog's textual code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "-" => Some(LikelihoodCode::Certain),
            "3.2" => Some(LikelihoodCode::HighlyLikelyProminent),
            "3.1" => Some(LikelihoodCode::HighlyLikely),
            "2.2" => Some(LikelihoodCode::QuiteLikelyProminent),
            "2.1" => Some(LikelihoodCode::QuiteLikely),
            _ => None,
        }
    }

    /// Parse a raw catalog value
    ///
    /// Strings are taken as-is and numbers by their decimal rendering, so
    /// both `"3.2"` and `3.2` are accepted.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::from_code(s),
            serde_json::Value::Number(n) => Self::from_code(&n.to_string()),
            _ => None,
        }
    }

    /// The catalog's textual code
    pub fn as_str(&self) -> &'static str {
        match self {
            LikelihoodCode::Certain => "-",
            LikelihoodCode::HighlyLikelyProminent => "3.2",
            LikelihoodCode::HighlyLikely => "3.1",
            LikelihoodCode::QuiteLikelyProminent => "2.2",
            LikelihoodCode::QuiteLikely => "2.1",
        }
    }

    /// Sort rank, 0 is most certain
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            LikelihoodCode::Certain => "Certain",
            LikelihoodCode::HighlyLikelyProminent => "Highly likely (prominent)",
            LikelihoodCode::HighlyLikely => "Highly likely",
            LikelihoodCode::QuiteLikelyProminent => "Quite likely (prominent)",
            LikelihoodCode::QuiteLikely => "Quite likely",
        }
    }

    /// Badge color
    pub fn color(&self) -> &'static str {
        match self {
            LikelihoodCode::Certain => "#2c5f2d",
            LikelihoodCode::HighlyLikelyProminent => "#388e3c",
            LikelihoodCode::HighlyLikely => "#66bb6a",
            LikelihoodCode::QuiteLikelyProminent => "#7cb342",
            LikelihoodCode::QuiteLikely => "#9ccc65",
        }
    }

    /// Keystone species are drawn as trees in the diorama
    pub fn is_keystone(&self) -> bool {
        matches!(
            self,
            LikelihoodCode::Certain | LikelihoodCode::HighlyLikelyProminent
        )
    }
}

/// Rank of a raw textual code; invalid codes sort last
pub fn rank_of(code: &str) -> u8 {
    LikelihoodCode::from_code(code)
        .map(|c| c.rank())
        .unwrap_or(UNRANKED)
}

impl Display for LikelihoodCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
