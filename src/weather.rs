//! Daily weather synthesis and the reference evapotranspiration chain.
//!
//! Each tick draws the raw variables from Normal(mean, std dev) for the
//! requested month, then runs the vapor-pressure chain and the
//! Penman-Monteith combination equation to arrive at ET0.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;

use crate::{
    rng::StreamRng,
    stats::{ClimateError, ClimateProvider, ClimateStat},
};

/// Specific heat of dry air at constant pressure (J/(kg·°C)).
const DRY_AIR_SPECIFIC_HEAT: f64 = 1005.0;
/// Specific gas constant for water vapor (J/(kg·°C)).
const WATER_VAPOR_GAS_CONSTANT: f64 = 461.0;

/// Saturation vapor pressure es (kPa) at air temperature T (°C).
pub fn saturation_vapor_pressure(temperature: f64) -> f64 {
    0.6108 * ((17.27 * temperature) / (temperature + 237.3)).exp()
}

/// Actual vapor pressure ea (kPa) from es and relative humidity (%).
pub fn actual_vapor_pressure(es: f64, humidity: f64) -> f64 {
    (humidity / 100.0) * es
}

/// Slope of the saturation vapor pressure curve delta (kPa/°C).
pub fn vapor_pressure_slope(es: f64, temperature: f64) -> f64 {
    (4098.0 * es) / (temperature + 237.3).powi(2)
}

/// Soil heat flux density G (MJ/m²/day) as a random fraction of net
/// radiation. The fraction varies per day within the empirical 0.1..0.3
/// range for how efficiently soil conducts heat.
pub fn soil_heat_flux(net_radiation: f64, rng: &mut StreamRng<'_>) -> f64 {
    let alpha: f64 = rng.gen_range(0.1..0.3);
    alpha * net_radiation
}

/// Psychrometric constant gamma (kPa/°C) from surface pressure (kPa),
/// specific humidity (kg/kg) and air temperature (°C).
pub fn psychrometric_constant(
    surface_pressure: f64,
    specific_humidity: f64,
    temperature: f64,
) -> f64 {
    let mixing_ratio = if specific_humidity == 1.0 {
        specific_humidity
    } else {
        specific_humidity / (1.0 - specific_humidity)
    };
    let specific_heat =
        DRY_AIR_SPECIFIC_HEAT + mixing_ratio * WATER_VAPOR_GAS_CONSTANT / temperature;
    0.00163 * surface_pressure / specific_heat
}

/// Penman-Monteith reference evapotranspiration ET0 (mm/day).
pub fn reference_evapotranspiration(
    delta: f64,
    net_radiation: f64,
    heat_flux: f64,
    gamma: f64,
    temperature: f64,
    wind_speed: f64,
    es: f64,
    ea: f64,
) -> f64 {
    let radiation_term = 0.408 * delta * (net_radiation - heat_flux);
    let aerodynamic_term = gamma * (900.0 / (temperature + 273.0)) * wind_speed * (es - ea);
    (radiation_term + aerodynamic_term) / (delta + gamma * (1.0 + 0.34 * wind_speed))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normal draw for one statistic, rounded to two decimals.
pub(crate) fn sample_normal(stat: ClimateStat, rng: &mut StreamRng<'_>) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    round2(stat.mean + stat.std_dev * z)
}

/// One day's synthesized weather and derived evapotranspiration quantities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyWeather {
    /// Air temperature at 2 m (°C).
    pub temperature: f64,
    /// Relative humidity at 2 m (%).
    pub humidity: f64,
    /// Rainfall depth (mm). Always zero; rain is disabled in this model.
    pub precipitation: f64,
    /// Wind speed at 2 m (m/s).
    pub wind_speed: f64,
    /// Surface pressure (kPa).
    pub surface_pressure: f64,
    /// Specific humidity at 2 m (kg/kg).
    pub specific_humidity: f64,
    /// Net radiation (MJ/m²/day).
    pub net_radiation: f64,
    /// All-sky insolation clearness index (0..1).
    pub sky_clearness: f64,
    pub is_raining: bool,
    pub is_cloudy: bool,
    /// Saturation vapor pressure (kPa).
    pub es: f64,
    /// Actual vapor pressure (kPa).
    pub ea: f64,
    /// Slope of the saturation vapor pressure curve (kPa/°C).
    pub delta: f64,
    /// Soil heat flux density (MJ/m²/day).
    pub soil_heat_flux: f64,
    /// Psychrometric constant (kPa/°C).
    pub gamma: f64,
    /// Reference evapotranspiration (mm/day).
    pub et0: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct WeatherGenerator;

impl WeatherGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Sample one day of weather for `month` from the provider's statistics.
    ///
    /// Fails when the provider carries no row for the month. ET0 is not
    /// clamped; negative or non-finite values pass through to the caller.
    pub fn sample<P: ClimateProvider>(
        &self,
        provider: &P,
        month: u32,
        rng: &mut StreamRng<'_>,
    ) -> Result<DailyWeather, ClimateError> {
        let stats = provider.monthly(month)?;

        let temperature = sample_normal(stats.temperature, rng);
        let humidity = sample_normal(stats.humidity, rng);
        // Rain is drawn to keep the stream position stable, then discarded.
        let _ = sample_normal(stats.precipitation, rng);
        let wind_speed = sample_normal(stats.wind_speed, rng);
        let surface_pressure = sample_normal(stats.surface_pressure, rng);
        let specific_humidity = sample_normal(stats.specific_humidity, rng);
        let net_radiation = sample_normal(stats.net_radiation, rng);
        let sky_clearness = sample_normal(stats.sky_clearness, rng);

        let es = round2(saturation_vapor_pressure(temperature));
        let ea = round2(actual_vapor_pressure(es, humidity));
        let delta = round2(vapor_pressure_slope(es, temperature));
        let heat_flux = soil_heat_flux(net_radiation, rng);
        let gamma = psychrometric_constant(surface_pressure, specific_humidity, temperature);
        let et0 = reference_evapotranspiration(
            delta,
            net_radiation,
            heat_flux,
            gamma,
            temperature,
            wind_speed,
            es,
            ea,
        );

        Ok(DailyWeather {
            temperature,
            humidity,
            precipitation: 0.0,
            wind_speed,
            surface_pressure,
            specific_humidity,
            net_radiation,
            sky_clearness,
            is_raining: false,
            is_cloudy: sky_clearness < 0.5,
            es,
            ea,
            delta,
            soil_heat_flux: heat_flux,
            gamma,
            et0,
        })
    }
}

impl Default for WeatherGenerator {
    fn default() -> Self {
        Self::new()
    }
}
