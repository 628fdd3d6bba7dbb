//! Season progression over a real calendar.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        };
        f.write_str(name)
    }
}

pub fn season_for_month(month: u32) -> Season {
    match month {
        3..=5 => Season::Spring,
        6..=7 => Season::Summer,
        8..=11 => Season::Fall,
        _ => Season::Winter,
    }
}

/// Current simulation date, advanced one day per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimDate {
    current: NaiveDate,
}

impl SimDate {
    pub fn new(start: NaiveDate) -> Self {
        Self { current: start }
    }

    pub fn date(&self) -> NaiveDate {
        self.current
    }

    pub fn month(&self) -> u32 {
        self.current.month()
    }

    pub fn season(&self) -> Season {
        season_for_month(self.month())
    }

    /// Step to the next calendar day. Saturates at the calendar's end.
    pub fn advance(&mut self) {
        if let Some(next) = self.current.succ_opt() {
            self.current = next;
        }
    }
}
