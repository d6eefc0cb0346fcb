//! Text and JSON rendering of advisor output.

use std::io::Write;

use anyhow::Result;
use aqi::{Assessment, Pollutant, PollutantReading};
use clap::ValueEnum;
use serde::Serialize;

use crate::alerts::Alert;
use crate::chat::Reply;
use crate::forecast::ForecastPoint;
use crate::sensors::Sensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct AqiSummary {
    pm25: f64,
    aqi: u16,
    status: aqi::AqiStatus,
    label: &'static str,
    color: &'static str,
}

pub fn render_aqi<W: Write>(out: &mut W, format: OutputFormat, pm25: f64, aqi: u16) -> Result<()> {
    let status = aqi::classify_status(aqi);
    match format {
        OutputFormat::Json => write_json(
            out,
            &AqiSummary {
                pm25,
                aqi,
                status,
                label: status.label(),
                color: status.color(),
            },
        ),
        OutputFormat::Text => {
            writeln!(out, "PM2.5 {} µg/m³ -> AQI {}", pm25, aqi)?;
            writeln!(out, "{} ({})", status.label(), status.color())?;
            writeln!(out, "{}", status.description())?;
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct SensorRow<'a> {
    id: &'a str,
    name: &'a str,
    address: &'a str,
    aqi: u16,
    status: aqi::AqiStatus,
    readings: &'a PollutantReading,
}

pub fn render_sensors<W: Write>(out: &mut W, format: OutputFormat, sensors: &[Sensor]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = sensors
                .iter()
                .map(|sensor| SensorRow {
                    id: &sensor.id,
                    name: &sensor.name,
                    address: &sensor.location.address,
                    aqi: sensor.aqi(),
                    status: sensor.status(),
                    readings: &sensor.readings,
                })
                .collect();
            write_json(out, &rows)
        }
        OutputFormat::Text => {
            writeln!(out, "{:<12} {:<20} {:>5}  {:<10} {:>8}", "ID", "NAME", "AQI", "STATUS", "PM2.5")?;
            for sensor in sensors {
                writeln!(
                    out,
                    "{:<12} {:<20} {:>5}  {:<10} {:>8}",
                    sensor.id,
                    sensor.name,
                    sensor.aqi(),
                    sensor.status().label(),
                    sensor.readings.pm25
                )?;
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct AssessmentReport<'a> {
    sensor: Option<&'a str>,
    readings: &'a PollutantReading,
    #[serde(flatten)]
    assessment: &'a Assessment,
}

pub fn render_assessment<W: Write>(
    out: &mut W,
    format: OutputFormat,
    sensor: Option<&Sensor>,
    reading: &PollutantReading,
    assessment: &Assessment,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(
            out,
            &AssessmentReport {
                sensor: sensor.map(|s| s.id.as_str()),
                readings: reading,
                assessment,
            },
        ),
        OutputFormat::Text => {
            if let Some(sensor) = sensor {
                writeln!(out, "{} ({})", sensor.name, sensor.location.address)?;
            }
            writeln!(
                out,
                "AQI {} - {}: {}",
                assessment.aqi,
                assessment.status.label(),
                assessment.status.description()
            )?;
            writeln!(out, "Health risk: {}/100", assessment.risk)?;
            for pollutant in Pollutant::ALL {
                writeln!(out, "  {:<12} {}", pollutant.label(), reading.measurement(pollutant))?;
            }
            writeln!(out, "Advice:")?;
            for advice in &assessment.advice {
                writeln!(out, "  - {}", advice)?;
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ForecastReport<'a> {
    sensor: &'a str,
    points: &'a [ForecastPoint],
    insights: &'a [&'static str],
}

pub fn render_forecast<W: Write>(
    out: &mut W,
    format: OutputFormat,
    sensor: &Sensor,
    points: &[ForecastPoint],
    insights: &[&'static str],
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(
            out,
            &ForecastReport {
                sensor: &sensor.id,
                points,
                insights,
            },
        ),
        OutputFormat::Text => {
            writeln!(out, "Forecast for {}", sensor.name)?;
            writeln!(out, "{:<17} {:>5}  {:<10} {:>6} {:>6}", "TIME", "AQI", "STATUS", "PM2.5", "PM10")?;
            for point in points {
                writeln!(
                    out,
                    "{:<17} {:>5}  {:<10} {:>6.1} {:>6.1}",
                    point.time.format("%Y-%m-%d %H:%M"),
                    point.aqi,
                    point.status().label(),
                    point.pm25,
                    point.pm10
                )?;
            }
            writeln!(out, "Insights:")?;
            for insight in insights {
                writeln!(out, "  - {}", insight)?;
            }
            Ok(())
        }
    }
}

pub fn render_reply<W: Write>(out: &mut W, format: OutputFormat, reply: &Reply) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, reply),
        OutputFormat::Text => {
            writeln!(out, "{}", reply.text)?;
            Ok(())
        }
    }
}

pub fn render_alerts<W: Write>(out: &mut W, format: OutputFormat, alerts: &[Alert]) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, alerts),
        OutputFormat::Text => {
            if alerts.is_empty() {
                writeln!(out, "No health alerts.")?;
            }
            for alert in alerts {
                writeln!(out, "[{:?}] {} Alert: {}", alert.severity, alert.pollutant, alert.message)?;
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct Greeting<'a> {
    greeting: &'a str,
    suggestions: &'a [&'static str],
}

pub fn render_greeting<W: Write>(
    out: &mut W,
    format: OutputFormat,
    greeting: &str,
    suggestions: &[&'static str],
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &Greeting { greeting, suggestions }),
        OutputFormat::Text => {
            writeln!(out, "{}", greeting)?;
            writeln!(out, "Try asking:")?;
            for suggestion in suggestions {
                writeln!(out, "  - {}", suggestion)?;
            }
            Ok(())
        }
    }
}
