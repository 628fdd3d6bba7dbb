pub mod calendar;
pub mod disease;
pub mod phenology;
pub mod rng;
pub mod scenario;
pub mod sim;
pub mod stats;
pub mod water;
pub mod weather;

pub use scenario::{Scenario, ScenarioLoader};
pub use sim::{DayRecord, Simulation};
pub use stats::{ClimateError, ClimateProvider, ClimateStat, ClimateTable, MonthlyClimate};
