use serde::Serialize;

use crate::{
    disease::{assess, yield_effect, ControlAction, Disease},
    phenology::{DailyGrowth, PhenologyTracker, Stage},
    rng::RngManager,
    stats::{ClimateError, ClimateProvider},
    water::{crop_coefficient, sample_soil_wetness, water_need, WaterBalance},
    weather::{DailyWeather, WeatherGenerator},
};

const INITIAL_HARVEST: f64 = 100.0;

/// Everything observable about one simulated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    /// Days elapsed since planting, starting at 1.
    pub day: u64,
    pub month: u32,
    /// Irrigation depth applied today (mm).
    pub irrigation: f64,
    pub weather: DailyWeather,
    pub growth: DailyGrowth,
    pub crop_coefficient: f64,
    /// Crop evapotranspiration ETc = Kc * ET0 (mm).
    pub crop_evapotranspiration: f64,
    /// Stage-scaled water need before evapotranspiration (mm).
    pub water_need: f64,
    /// Total water demand: need plus ETc (mm).
    pub water_demand: f64,
    /// Today's soil wetness supply draw (mm).
    pub soil_wetness: f64,
    pub soil_moisture: f64,
    pub accumulated_scarcity: f64,
    pub accumulated_excess: f64,
    /// Harvest fraction remaining (starts at 100).
    pub harvest: f64,
    pub disease: Option<Disease>,
    pub control: ControlAction,
    pub is_crop_sick: bool,
}

/// Day-by-day wheat season over a climate provider.
#[derive(Debug, Clone)]
pub struct Simulation<P: ClimateProvider> {
    provider: P,
    generator: WeatherGenerator,
    phenology: PhenologyTracker,
    water: WaterBalance,
    harvest: f64,
    rng: RngManager,
    day: u64,
}

impl<P: ClimateProvider> Simulation<P> {
    pub fn new(provider: P, seed: u64) -> Self {
        Self {
            provider,
            generator: WeatherGenerator::new(),
            phenology: PhenologyTracker::new(),
            water: WaterBalance::new(),
            harvest: INITIAL_HARVEST,
            rng: RngManager::new(seed),
            day: 0,
        }
    }

    /// Advance the season by one day under the given month's climate.
    pub fn tick(&mut self, month: u32, irrigation: f64) -> Result<DayRecord, ClimateError> {
        let weather = {
            let mut rng = self.rng.weather();
            self.generator.sample(&self.provider, month, &mut rng)?
        };

        let growth = self.phenology.advance(weather.temperature);

        let mut rng = self.rng.water();
        let kc = crop_coefficient(growth.stage, &mut rng);
        let etc = kc * weather.et0;
        let need = water_need(weather.temperature, growth.stage, &mut rng);
        let wetness = sample_soil_wetness(&self.provider, month, &mut rng)?;

        let demand = need + etc;
        self.water.update(wetness, irrigation, demand);

        let scarcity = self.water.accumulated_scarcity();
        let excess = self.water.accumulated_excess();
        self.harvest = yield_effect(self.harvest, excess, scarcity);
        let assessment = assess(scarcity, excess);

        self.day += 1;
        Ok(DayRecord {
            day: self.day,
            month,
            irrigation,
            weather,
            growth,
            crop_coefficient: kc,
            crop_evapotranspiration: etc,
            water_need: need,
            water_demand: demand,
            soil_wetness: wetness,
            soil_moisture: self.water.soil_moisture(),
            accumulated_scarcity: scarcity,
            accumulated_excess: excess,
            harvest: self.harvest,
            disease: assessment.disease,
            control: assessment.control,
            is_crop_sick: assessment.is_sick,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn harvest(&self) -> f64 {
        self.harvest
    }

    pub fn stage(&self) -> Stage {
        self.phenology.stage()
    }

    pub fn phenology(&self) -> &PhenologyTracker {
        &self.phenology
    }

    pub fn water(&self) -> &WaterBalance {
        &self.water
    }
}
