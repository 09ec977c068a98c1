use crate::error::AllocationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Room-filling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Random sample of courses per room, drawn in shuffled order.
    #[default]
    Smart,
    /// One course per room, the one with the most students pending.
    /// Rooms are never backfilled from a second course.
    CourseWise,
    /// Largest-remaining courses first, ties shuffled.
    Balanced,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Smart => "smart",
            Strategy::CourseWise => "course-wise",
            Strategy::Balanced => "balanced",
        }
    }

    /// Whether the strategy mixes several courses in one room.
    pub fn is_multi_course(&self) -> bool {
        !matches!(self, Strategy::CourseWise)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smart" => Ok(Strategy::Smart),
            "course-wise" | "coursewise" | "course_wise" => Ok(Strategy::CourseWise),
            "balanced" => Ok(Strategy::Balanced),
            _ => Err(AllocationError::UnknownStrategy(s.to_string())),
        }
    }
}
