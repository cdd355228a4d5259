use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PriceError;

/// Number of delivery days per week.
///
/// Serialized as the plain integer (5, 6 or 7), including as a JSON map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DayBand {
    Five,
    Six,
    Seven,
}

impl DayBand {
    pub const ALL: [DayBand; 3] = [DayBand::Five, DayBand::Six, DayBand::Seven];

    pub fn days(self) -> u32 {
        match self {
            DayBand::Five => 5,
            DayBand::Six => 6,
            DayBand::Seven => 7,
        }
    }
}

impl TryFrom<u32> for DayBand {
    type Error = PriceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(DayBand::Five),
            6 => Ok(DayBand::Six),
            7 => Ok(DayBand::Seven),
            other => Err(PriceError::InvalidInput(format!(
                "day count must be 5, 6 or 7 (got {})",
                other
            ))),
        }
    }
}

impl From<DayBand> for u32 {
    fn from(band: DayBand) -> Self {
        band.days()
    }
}

impl fmt::Display for DayBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// Subscription length in weeks.
///
/// Serialized as the plain integer (1, 2 or 4), including as a JSON map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WeekBand {
    One,
    Two,
    Four,
}

impl WeekBand {
    pub const ALL: [WeekBand; 3] = [WeekBand::One, WeekBand::Two, WeekBand::Four];

    pub fn weeks(self) -> u32 {
        match self {
            WeekBand::One => 1,
            WeekBand::Two => 2,
            WeekBand::Four => 4,
        }
    }
}

impl TryFrom<u32> for WeekBand {
    type Error = PriceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WeekBand::One),
            2 => Ok(WeekBand::Two),
            4 => Ok(WeekBand::Four),
            other => Err(PriceError::InvalidInput(format!(
                "week count must be 1, 2 or 4 (got {})",
                other
            ))),
        }
    }
}

impl From<WeekBand> for u32 {
    fn from(band: WeekBand) -> Self {
        band.weeks()
    }
}

impl fmt::Display for WeekBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.weeks())
    }
}

/// Total service days for a day/week band pair.
#[inline]
pub fn plan_days(days: DayBand, weeks: WeekBand) -> u32 {
    days.days() * weeks.weeks()
}
