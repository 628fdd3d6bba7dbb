use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    calendar::SimDate,
    sim::Simulation,
    stats::{ClimateTable, MonthlyClimate},
};

fn default_days() -> u64 {
    180
}

fn default_irrigation_mm() -> f64 {
    5.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    pub start_date: NaiveDate,
    #[serde(default = "default_days")]
    pub days: u64,
    /// Fixed irrigation depth applied every day (mm).
    #[serde(default = "default_irrigation_mm")]
    pub irrigation_mm: f64,
    pub climate: Vec<ClimateRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClimateRow {
    pub month: u32,
    #[serde(flatten)]
    pub stats: MonthlyClimate,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    /// A scenario must cover every calendar month so a season can run
    /// across month boundaries without failing mid-way.
    pub fn validate(&self) -> Result<()> {
        if self.days == 0 {
            bail!("scenario must run for at least one day");
        }
        if !self.irrigation_mm.is_finite() || self.irrigation_mm < 0.0 {
            bail!(
                "irrigation_mm must be finite and non-negative, got {}",
                self.irrigation_mm
            );
        }
        let mut seen = [false; 13];
        for row in &self.climate {
            if !(1..=12).contains(&row.month) {
                bail!("climate row month {} out of range 1..=12", row.month);
            }
            if seen[row.month as usize] {
                bail!("duplicate climate row for month {}", row.month);
            }
            seen[row.month as usize] = true;
        }
        for month in 1..=12usize {
            if !seen[month] {
                bail!("climate table missing month {month}");
            }
        }
        self.climate_table().validate()?;
        Ok(())
    }

    pub fn climate_table(&self) -> ClimateTable {
        let mut table = ClimateTable::new();
        for row in &self.climate {
            table.insert(row.month, row.stats.clone());
        }
        table
    }

    pub fn build(&self) -> Simulation<ClimateTable> {
        Simulation::new(self.climate_table(), self.seed)
    }

    pub fn start(&self) -> SimDate {
        SimDate::new(self.start_date)
    }

    pub fn days(&self, override_days: Option<u64>) -> u64 {
        override_days.unwrap_or(self.days)
    }
}
