use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use wheatsim::{scenario::ScenarioLoader, sim::DayRecord};

#[derive(Debug, Parser)]
#[command(author, version, about = "Wheat agro-climatic season runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/heartland.yaml")]
    scenario: PathBuf,

    /// Override season length in days (uses scenario default when omitted)
    #[arg(long)]
    days: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the fixed daily irrigation depth in millimeters
    #[arg(long)]
    irrigation: Option<f64>,

    /// Emit one JSON object per day instead of the table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    if let Some(irrigation) = cli.irrigation {
        scenario.irrigation_mm = irrigation;
    }
    let days = scenario.days(cli.days);

    let mut sim = scenario.build();
    let mut date = scenario.start();
    let mut last: Option<DayRecord> = None;

    if !cli.json {
        println!(
            "{:>4}  {:>10}  {:>6}  {:>6}  {:>6}  {:>8}  {:>8}  {:>8}  {:>7}",
            "day", "date", "temp", "et0", "stage", "moisture", "scarcity", "excess", "harvest"
        );
    }

    for _ in 0..days {
        let record = sim.tick(date.month(), scenario.irrigation_mm)?;
        if cli.json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            let stage = record.growth.stage.to_string();
            println!(
                "{:>4}  {:>10}  {:>6.1}  {:>6.2}  {:>6}  {:>8.1}  {:>8.1}  {:>8.1}  {:>7.1}",
                record.day,
                date.date(),
                record.weather.temperature,
                record.weather.et0,
                stage.as_str(),
                record.soil_moisture,
                record.accumulated_scarcity,
                record.accumulated_excess,
                record.harvest,
            );
        }
        date.advance();
        last = Some(record);
    }

    if let Some(record) = last {
        println!(
            "Scenario '{}' completed after {} days. Stage {} ({}), harvest {:.1}%, scarcity {:.1} mm, excess {:.1} mm",
            scenario.name,
            days,
            record.growth.stage,
            record.growth.description,
            record.harvest,
            record.accumulated_scarcity,
            record.accumulated_excess,
        );
    }
    Ok(())
}
