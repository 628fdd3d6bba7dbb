//! Monthly climate statistics and the provider seam.
//!
//! The simulation core never reads files; it asks a [`ClimateProvider`] for
//! the (mean, std dev) pairs of the month it is ticking through. The
//! in-memory [`ClimateTable`] is the stock implementation, filled by the
//! scenario loader.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error("no climate statistics for month {month}")]
    MissingMonth { month: u32 },
    #[error("invalid climate table: {0}")]
    InvalidTable(String),
}

/// Mean and standard deviation of one sampled variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateStat {
    pub mean: f64,
    pub std_dev: f64,
}

impl ClimateStat {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// Statistics for every variable sampled in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyClimate {
    /// Air temperature at 2 m (°C).
    pub temperature: ClimateStat,
    /// Relative humidity at 2 m (%).
    pub humidity: ClimateStat,
    /// Rainfall depth (mm/day).
    pub precipitation: ClimateStat,
    /// Wind speed at 2 m (m/s).
    pub wind_speed: ClimateStat,
    /// Surface pressure (kPa).
    pub surface_pressure: ClimateStat,
    /// Specific humidity at 2 m (kg/kg).
    pub specific_humidity: ClimateStat,
    /// Daily net radiation (MJ/m²/day).
    pub net_radiation: ClimateStat,
    /// All-sky insolation clearness index (0..1).
    pub sky_clearness: ClimateStat,
    /// Surface soil wetness (0..1).
    pub soil_wetness: ClimateStat,
}

impl MonthlyClimate {
    fn stats(&self) -> [(&'static str, ClimateStat); 9] {
        [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("precipitation", self.precipitation),
            ("wind_speed", self.wind_speed),
            ("surface_pressure", self.surface_pressure),
            ("specific_humidity", self.specific_humidity),
            ("net_radiation", self.net_radiation),
            ("sky_clearness", self.sky_clearness),
            ("soil_wetness", self.soil_wetness),
        ]
    }
}

/// Read-only source of monthly climate statistics.
pub trait ClimateProvider {
    fn monthly(&self, month: u32) -> Result<&MonthlyClimate, ClimateError>;

    fn soil_wetness(&self, month: u32) -> Result<ClimateStat, ClimateError> {
        Ok(self.monthly(month)?.soil_wetness)
    }
}

/// In-memory climate table keyed by calendar month (1..=12).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClimateTable {
    months: HashMap<u32, MonthlyClimate>,
}

impl ClimateTable {
    pub fn new() -> Self {
        Self {
            months: HashMap::new(),
        }
    }

    pub fn insert(&mut self, month: u32, climate: MonthlyClimate) -> Option<MonthlyClimate> {
        self.months.insert(month, climate)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Reject months outside the calendar and non-finite or negative spreads.
    pub fn validate(&self) -> Result<(), ClimateError> {
        let mut entries: Vec<(&u32, &MonthlyClimate)> = self.months.iter().collect();
        entries.sort_by_key(|(month, _)| **month);
        for (&month, climate) in entries {
            if !(1..=12).contains(&month) {
                return Err(ClimateError::InvalidTable(format!(
                    "month {month} out of range 1..=12"
                )));
            }
            for (name, stat) in climate.stats() {
                if !stat.mean.is_finite() {
                    return Err(ClimateError::InvalidTable(format!(
                        "month {month}: {name} mean is not finite"
                    )));
                }
                if !stat.std_dev.is_finite() || stat.std_dev < 0.0 {
                    return Err(ClimateError::InvalidTable(format!(
                        "month {month}: {name} std dev must be finite and non-negative"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl ClimateProvider for ClimateTable {
    fn monthly(&self, month: u32) -> Result<&MonthlyClimate, ClimateError> {
        self.months
            .get(&month)
            .ok_or(ClimateError::MissingMonth { month })
    }
}
