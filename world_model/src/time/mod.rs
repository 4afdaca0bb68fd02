//! In-world time used to stamp events.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::WorldError;

const MINUTES_PER_HOUR: u32 = 60;
const HOURS_PER_DAY: u32 = 24;

/// A point in world time.
///
/// `new` and deserialization keep `hour` below 24 and `minute` below 60.
/// Ordered by absolute minute; the season is a label and does not take part
/// in comparisons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(try_from = "RawWorldTime")]
pub struct WorldTime {
    pub day: u32,
    pub hour: u8,
    pub minute: u8,
    pub season: Season,
}

impl WorldTime {
    /// Create a new world time, carrying excess minutes into hours and
    /// excess hours into days, so `(1, 25, 0)` becomes `(2, 1, 0)`.
    pub fn new(day: u32, hour: u8, minute: u8, season: Season) -> Self {
        let hours = hour as u32 + minute as u32 / MINUTES_PER_HOUR;
        Self {
            day: day.saturating_add(hours / HOURS_PER_DAY),
            hour: (hours % HOURS_PER_DAY) as u8,
            minute: (minute as u32 % MINUTES_PER_HOUR) as u8,
            season,
        }
    }

    /// Minutes elapsed since day 0, 00:00.
    pub fn total_minutes(&self) -> u64 {
        self.day as u64 * 24 * 60 + self.hour as u64 * 60 + self.minute as u64
    }
}

/// Wire form of [`WorldTime`]; out-of-range fields are rejected rather than
/// normalized.
#[derive(Deserialize)]
struct RawWorldTime {
    day: u32,
    hour: u8,
    minute: u8,
    #[serde(default)]
    season: Season,
}

impl TryFrom<RawWorldTime> for WorldTime {
    type Error = WorldError;

    fn try_from(raw: RawWorldTime) -> Result<Self, Self::Error> {
        if raw.hour as u32 >= HOURS_PER_DAY || raw.minute as u32 >= MINUTES_PER_HOUR {
            return Err(WorldError::validation(format!(
                "Invalid time of day {:02}:{:02}",
                raw.hour, raw.minute
            )));
        }
        Ok(Self {
            day: raw.day,
            hour: raw.hour,
            minute: raw.minute,
            season: raw.season,
        })
    }
}

impl PartialEq for WorldTime {
    fn eq(&self, other: &Self) -> bool {
        self.total_minutes() == other.total_minutes()
    }
}

impl Eq for WorldTime {}

impl PartialOrd for WorldTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WorldTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_minutes().cmp(&other.total_minutes())
    }
}

/// Seasons of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}
