//! Genre types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of genres songs can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Pop,
    Rock,
    Jazz,
    Classical,
    HipHop,
    Electronic,
    #[serde(rename = "R&B")]
    RnB,
    Country,
}

impl Genre {
    pub const ALL: [Genre; 8] = [
        Genre::Pop,
        Genre::Rock,
        Genre::Jazz,
        Genre::Classical,
        Genre::HipHop,
        Genre::Electronic,
        Genre::RnB,
        Genre::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::Jazz => "Jazz",
            Genre::Classical => "Classical",
            Genre::HipHop => "HipHop",
            Genre::Electronic => "Electronic",
            Genre::RnB => "R&B",
            Genre::Country => "Country",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = crate::CadenceError;

    /// Exact, case-sensitive match against the display names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| crate::CadenceError::invalid_input("Invalid genre selected"))
    }
}
