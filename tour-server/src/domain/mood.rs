//! Tour mood and the category it puts first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Category, DomainError};

/// The user's preference for how the tour should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Food first.
    Hungry,
    /// Attractions first.
    Adventurous,
}

impl Mood {
    /// The category whose nearest member opens the route.
    pub fn leading_category(self) -> Category {
        match self {
            Mood::Hungry => Category::Food,
            Mood::Adventurous => Category::Attraction,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Hungry => "hungry",
            Mood::Adventurous => "adventurous",
        }
    }

    /// Human-readable description used in route headings.
    pub fn traveller(self) -> &'static str {
        match self {
            Mood::Hungry => "hungry tourist",
            Mood::Adventurous => "adventure seeker",
        }
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hungry" => Ok(Mood::Hungry),
            "adventurous" => Ok(Mood::Adventurous),
            _ => Err(DomainError::UnknownMood(s.to_string())),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
