//! Crop water demand, crop coefficient and the soil water ledger.

use rand::Rng;
use serde::Serialize;

use crate::{
    phenology::Stage,
    rng::StreamRng,
    stats::{ClimateError, ClimateProvider},
    weather::sample_normal,
};

/// Wheat demands 10% more water than the grass reference.
const WHEAT_FACTOR: f64 = 1.1;

/// Daily crop water need (mm) for the day's temperature and growth stage.
///
/// The base draw always happens, even for a finished crop, so the stream
/// position stays independent of stage.
pub fn water_need(temperature: f64, stage: Stage, rng: &mut StreamRng<'_>) -> f64 {
    let base = if temperature < 15.0 {
        rng.gen_range(4.0..6.0)
    } else if temperature <= 25.0 {
        rng.gen_range(7.0..8.0)
    } else {
        rng.gen_range(9.0..10.0)
    };
    let need = base * WHEAT_FACTOR;
    match stage {
        Stage::Done => 0.0,
        Stage::Numeric(code) if (0.5..=6.0).contains(&code) => 0.5 * need,
        Stage::Numeric(code) if (11.0..=12.0).contains(&code) => 0.25 * need,
        Stage::Numeric(_) => need,
    }
}

/// Crop coefficient Kc for the current growth stage.
pub fn crop_coefficient(stage: Stage, rng: &mut StreamRng<'_>) -> f64 {
    match stage {
        Stage::Numeric(code) if (0.5..=6.0).contains(&code) => rng.gen_range(0.2..0.53),
        Stage::Numeric(code) if (7.0..=10.2).contains(&code) => rng.gen_range(0.45..1.03),
        _ => rng.gen_range(0.2..0.5),
    }
}

/// Daily soil wetness supply (mm) drawn from the month's statistics.
pub fn sample_soil_wetness<P: ClimateProvider>(
    provider: &P,
    month: u32,
    rng: &mut StreamRng<'_>,
) -> Result<f64, ClimateError> {
    Ok(sample_normal(provider.soil_wetness(month)?, rng))
}

/// Running soil moisture level with season-to-date stress totals.
///
/// Moisture may go negative; the shortfall feeds the scarcity total and a
/// positive level feeds the excess total, both sampled after every update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterBalance {
    soil_moisture: f64,
    accumulated_scarcity: f64,
    accumulated_excess: f64,
}

impl WaterBalance {
    pub fn new() -> Self {
        Self { soil_moisture: 0.0, accumulated_scarcity: 0.0, accumulated_excess: 0.0 }
    }

    /// Apply one day of supply and demand to the moisture level.
    pub fn update(&mut self, wetness: f64, irrigation: f64, demand: f64) {
        self.soil_moisture += wetness + irrigation - demand;
        self.accumulated_scarcity += -self.soil_moisture.min(0.0);
        self.accumulated_excess += self.soil_moisture.max(0.0);
    }

    pub fn soil_moisture(&self) -> f64 {
        self.soil_moisture
    }

    pub fn accumulated_scarcity(&self) -> f64 {
        self.accumulated_scarcity
    }

    pub fn accumulated_excess(&self) -> f64 {
        self.accumulated_excess
    }
}

impl Default for WaterBalance {
    fn default() -> Self {
        Self::new()
    }
}
