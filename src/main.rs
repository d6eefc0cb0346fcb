use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use aqi::{
    compute_aqi, ActivityLevel, Assessment, ConditionSet, Gender, HealthCondition, HealthProfile,
    PollutantReading, PollutionSensitivity,
};
use aqi_advisor::alerts::generate_alerts;
use aqi_advisor::chat;
use aqi_advisor::config::{Exposure, ProfileStore, DEFAULT_PROFILE_PATH, PROFILE_ENV};
use aqi_advisor::forecast::{forecast_insights, generate_forecast};
use aqi_advisor::report::{self, OutputFormat};
use aqi_advisor::sensors::{self, Sensor};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aqi_advisor")]
#[command(version)]
#[command(about = "Air quality readings, forecasts and personalized health advice", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Health profile file
    #[arg(long, global = true, env = PROFILE_ENV, default_value = DEFAULT_PROFILE_PATH)]
    profile: PathBuf,

    /// Sensor snapshot (JSON list of sensors); the sample network if omitted
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PM2.5 concentration to AQI
    Aqi {
        /// PM2.5 concentration in µg/m³
        #[arg(allow_negative_numbers = true)]
        pm25: f64,
    },

    /// Assess a sensor or a manual reading against the health profile
    Assess {
        /// Sensor id from the snapshot
        #[arg(long, conflicts_with = "reading")]
        sensor: Option<String>,

        #[command(flatten)]
        reading: ReadingArgs,
    },

    /// List every sensor with its current AQI
    Sensors,

    /// Generate an hourly forecast with tips for the profile
    Forecast {
        #[arg(long, default_value_t = 24)]
        hours: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Sensor the tips are based on; the first one if omitted
        #[arg(long)]
        sensor: Option<String>,
    },

    /// Ask the health assistant a question; without one it introduces itself
    Ask {
        question: Vec<String>,

        /// Sensor to answer about; the first one if omitted
        #[arg(long)]
        sensor: Option<String>,
    },

    /// Health alerts for the profile's conditions
    Alerts {
        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Show or replace the stored health profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Args)]
#[group(id = "reading", multiple = true)]
struct ReadingArgs {
    /// PM2.5 in µg/m³
    #[arg(long, allow_negative_numbers = true)]
    pm25: Option<f64>,
    /// PM10 in µg/m³
    #[arg(long, default_value_t = 0.0)]
    pm10: f64,
    /// CO₂ in ppm
    #[arg(long, default_value_t = 400.0)]
    co2: f64,
    /// CO in ppm
    #[arg(long, default_value_t = 0.0)]
    co: f64,
    /// NO₂ in ppb
    #[arg(long, default_value_t = 0.0)]
    no2: f64,
    /// O₃ in ppb
    #[arg(long, default_value_t = 0.0)]
    o3: f64,
    /// SO₂ in ppb
    #[arg(long, default_value_t = 0.0)]
    so2: f64,
    /// Temperature in °C
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    temperature: f64,
    /// Relative humidity in %
    #[arg(long, default_value_t = 50.0)]
    humidity: f64,
}

impl ReadingArgs {
    fn to_reading(&self) -> Option<PollutantReading> {
        Some(PollutantReading {
            pm25: self.pm25?,
            pm10: self.pm10,
            co2: self.co2,
            co: self.co,
            no2: self.no2,
            o3: self.o3,
            so2: self.so2,
            temperature: self.temperature,
            humidity: self.humidity,
        })
    }
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the stored profile
    Show,

    /// Replace the stored profile
    Set {
        #[arg(long)]
        age: u16,
        #[arg(long)]
        gender: Gender,
        /// Repeat for each condition
        #[arg(long = "condition")]
        conditions: Vec<HealthCondition>,
        #[arg(long)]
        activity: ActivityLevel,
        #[arg(long, default_value = "medium")]
        sensitivity: PollutionSensitivity,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let store = ProfileStore::new(&cli.profile);

    match cli.command {
        Commands::Aqi { pm25 } => {
            let aqi = compute_aqi(pm25);
            tracing::debug!(pm25, aqi, "converted concentration");
            report::render_aqi(out, cli.format, pm25, aqi)
        }
        Commands::Assess { sensor, reading } => {
            let profile = store.load()?;
            let exposure = Exposure::from(profile.as_ref());
            let sensors = load_sensors(cli.snapshot.as_ref())?;

            let (sensor, reading) = match reading.to_reading() {
                Some(reading) if sensor.is_none() => (None, reading),
                _ => {
                    let sensor = select_sensor(&sensors, sensor.as_deref())?;
                    (Some(sensor), sensor.readings)
                }
            };

            if profile.is_none() {
                tracing::info!(
                    path = %store.path().display(),
                    "no health profile stored, assessing with default sensitivity"
                );
            }

            let assessment = Assessment::evaluate(&reading, exposure.conditions, exposure.sensitivity)
                .context("reading can't be assessed")?;
            report::render_assessment(out, cli.format, sensor, &reading, &assessment)
        }
        Commands::Sensors => {
            let sensors = load_sensors(cli.snapshot.as_ref())?;
            report::render_sensors(out, cli.format, &sensors)
        }
        Commands::Forecast { hours, seed, sensor } => {
            let profile = store.load()?;
            let sensors = load_sensors(cli.snapshot.as_ref())?;
            let sensor = select_sensor(&sensors, sensor.as_deref())?;

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let points = generate_forecast(hours, chrono::Utc::now(), &mut rng);
            let insights = forecast_insights(sensor, profile.as_ref());
            report::render_forecast(out, cli.format, sensor, &points, &insights)
        }
        Commands::Ask { question, sensor } => {
            let exposure = Exposure::from(store.load()?.as_ref());
            let sensors = load_sensors(cli.snapshot.as_ref())?;
            let sensor = select_sensor(&sensors, sensor.as_deref())?;

            if question.is_empty() {
                let greeting = chat::greeting(exposure.conditions);
                return report::render_greeting(out, cli.format, &greeting, &chat::SUGGESTED_QUESTIONS);
            }

            let reply = chat::answer(&question.join(" "), sensor, exposure.conditions);
            report::render_reply(out, cli.format, &reply)
        }
        Commands::Alerts { user } => {
            let exposure = Exposure::from(store.load()?.as_ref());
            let alerts = generate_alerts(&user, exposure.conditions, chrono::Utc::now());
            report::render_alerts(out, cli.format, &alerts)
        }
        Commands::Profile { action } => match action {
            ProfileAction::Show => match store.load()? {
                Some(profile) => {
                    serde_json::to_writer_pretty(&mut *out, &profile)?;
                    writeln!(out)?;
                    Ok(())
                }
                None => bail!(
                    "no health profile at {}, create one with `profile set`",
                    store.path().display()
                ),
            },
            ProfileAction::Set {
                age,
                gender,
                conditions,
                activity,
                sensitivity,
            } => {
                let conditions: ConditionSet = conditions.into_iter().collect();
                let profile = HealthProfile::new(age, gender, conditions, activity, sensitivity)?;
                store.save(&profile)
            }
        },
    }
}

fn load_sensors(snapshot: Option<&PathBuf>) -> Result<Vec<Sensor>> {
    match snapshot {
        Some(path) => Ok(sensors::load_snapshot(path)?),
        None => Ok(sensors::sample_network()),
    }
}

/// The sensor with `id`, or the first station like the dashboard uses.
fn select_sensor<'a>(sensors: &'a [Sensor], id: Option<&str>) -> Result<&'a Sensor> {
    match id {
        Some(id) => sensors::find(sensors, id).with_context(|| format!("no sensor with id {id}")),
        None => sensors.first().context("no sensors to report on"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;
    use std::fs;

    fn scratch_path(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("aqi_advisor_cli_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name).to_str().unwrap().to_string()
    }

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("aqi_advisor").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_pm25_is_clamped() {
        let text = run_args(&["aqi", "-3"]).unwrap();
        assert!(text.starts_with("PM2.5 -3 µg/m³ -> AQI 0\nGood"), "{text}");

        let json = run_args(&["aqi", "-0.5", "--format", "json"]).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(summary["aqi"], 0);
    }

    #[test]
    fn test_negative_manual_reading() {
        let profile = scratch_path("absent.json");

        // Below freezing is a valid reading.
        let text = run_args(&[
            "assess", "--pm25", "10", "--temperature", "-5", "--profile", &profile,
        ])
        .unwrap();
        assert!(text.starts_with("AQI 42 - Good"), "{text}");
        assert!(text.contains("-5 °C"));

        // Negative PM2.5 reaches the validation boundary instead of the parser.
        let err = run_args(&["assess", "--pm25", "-1", "--profile", &profile]).unwrap_err();
        assert_eq!(err.to_string(), "reading can't be assessed");
    }

    #[test]
    fn test_sensor_excludes_manual_reading() {
        for flag in ["--pm25", "--pm10", "--co2", "--humidity"] {
            let err = Cli::try_parse_from(["aqi_advisor", "assess", "--sensor", "sensor_2", flag, "5"])
                .err()
                .unwrap();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{flag}");
        }

        assert!(Cli::try_parse_from(["aqi_advisor", "assess", "--sensor", "sensor_2"]).is_ok());
        assert!(Cli::try_parse_from(["aqi_advisor", "assess", "--pm10", "5", "--co2", "2000"]).is_ok());
    }

    #[test]
    fn test_stored_profile_drives_assessment() {
        let profile = scratch_path("athlete.json");
        run_args(&[
            "profile", "set", "--age", "40", "--gender", "male", "--condition", "asthma",
            "--activity", "athlete", "--sensitivity", "high", "--profile", &profile,
        ])
        .unwrap();

        let shown: serde_json::Value =
            serde_json::from_str(&run_args(&["profile", "show", "--profile", &profile]).unwrap())
                .unwrap();
        assert_eq!(shown["conditions"], serde_json::json!(["asthma"]));
        assert_eq!(shown["activity"], "athlete");

        let json = run_args(&[
            "assess", "--sensor", "sensor_2", "--format", "json", "--profile", &profile,
        ])
        .unwrap();
        let report: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(report["sensor"], "sensor_2");
        assert_eq!(report["aqi"], 149);
        // 29.8 * 1.5 (asthma) * 1.3 (high)
        assert_eq!(report["risk"], 58);
        assert_eq!(report["advice"].as_array().unwrap().len(), 3);

        // Without the profile the same sensor scores lower.
        let json = run_args(&[
            "assess", "--sensor", "sensor_2", "--format", "json", "--profile",
            &scratch_path("missing.json"),
        ])
        .unwrap();
        let report: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(report["risk"], 30);
    }

    #[test]
    fn test_forecast_and_ask_use_profile() {
        let profile = scratch_path("forecast.json");
        run_args(&[
            "profile", "set", "--age", "22", "--gender", "female", "--condition", "asthma",
            "--activity", "athlete", "--profile", &profile,
        ])
        .unwrap();

        let json = run_args(&[
            "forecast", "--hours", "3", "--seed", "9", "--sensor", "sensor_4", "--format", "json",
            "--profile", &profile,
        ])
        .unwrap();
        let report: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(report["points"].as_array().unwrap().len(), 3);
        assert_eq!(
            report["insights"],
            serde_json::json!([
                "PM2.5 levels are elevated. As someone with asthma, consider wearing a mask if going outdoors.",
                "Consider moving your workout indoors or reducing intensity today."
            ])
        );

        let text = run_args(&["ask", "is", "it", "safe", "outside?", "--profile", &profile]).unwrap();
        assert!(text.starts_with("Current air quality (AQI: 50) is good!"), "{text}");

        let text = run_args(&["ask", "--profile", &profile]).unwrap();
        assert!(text.contains("I see you have asthma in your health profile"), "{text}");
        assert!(text.contains("  - Is it safe for me to go outside?\n"));

        let err = run_args(&["ask", "hello", "--sensor", "sensor_99", "--profile", &profile])
            .unwrap_err();
        assert_eq!(err.to_string(), "no sensor with id sensor_99");
    }
}
