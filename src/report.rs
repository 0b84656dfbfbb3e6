//! Presentation of run results
//!
//! The core only knows relative hours. This module renders a
//! [`SimulationResult`] as a text summary, a JSON document or CSV tables, and
//! turns relative hours into calendar timestamps when given the date of hour
//! zero.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use csv::Writer;

use crate::simulation::{SimResult, SimulationError, SimulationResult};
use crate::types::OutputFormat;

/// Format used for calendar timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert relative `hours` into a timestamp counted from midnight of `start`
pub fn hours_to_timestamp(start: NaiveDate, hours: f64) -> SimResult<NaiveDateTime> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(SimulationError::report_error(format!("invalid relative time {hours}")));
    }
    let midnight = start
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SimulationError::report_error(format!("no midnight on {start}")))?;
    let offset = Duration::milliseconds((hours * 3_600_000.0).round() as i64);
    midnight.checked_add_signed(offset).ok_or_else(|| {
        SimulationError::report_error(format!("{hours} hours after {start} is out of range"))
    })
}

fn format_timestamp(start: NaiveDate, hours: f64) -> SimResult<String> {
    Ok(hours_to_timestamp(start, hours)?.format(TIMESTAMP_FORMAT).to_string())
}

/// Plain-text summary with served and denied counts and utilization
pub fn summary_text(result: &SimulationResult, start_date: Option<NaiveDate>) -> SimResult<String> {
    let mut text = result.generate_summary_report();
    if let Some(start) = start_date {
        text.push_str(&format!(
            "Period: {} to {}\n",
            format_timestamp(start, 0.0)?,
            format_timestamp(start, result.horizon_hours)?
        ));
    }
    Ok(text)
}

/// Pretty-printed JSON document of the whole result
pub fn to_json(result: &SimulationResult) -> SimResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn finish_csv(writer: Writer<Vec<u8>>) -> SimResult<String> {
    let bytes = writer.into_inner().map_err(|e| SimulationError::report_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SimulationError::report_error(e.to_string()))
}

/// CSV table of attended passengers
pub fn attended_csv(result: &SimulationResult, start_date: Option<NaiveDate>) -> SimResult<String> {
    let mut writer = Writer::from_writer(Vec::new());
    let mut header =
        vec!["passenger", "arrival_time", "start_time", "end_time", "service_hours"];
    if start_date.is_some() {
        header.extend(["arrived_at", "started_at", "ended_at"]);
    }
    writer.write_record(&header)?;

    for record in &result.attended {
        let mut row = vec![
            record.passenger.to_string(),
            format!("{:.4}", record.arrival_time),
            format!("{:.4}", record.start_time),
            format!("{:.4}", record.end_time),
            format!("{:.4}", record.service_duration()),
        ];
        if let Some(start) = start_date {
            row.push(format_timestamp(start, record.arrival_time)?);
            row.push(format_timestamp(start, record.start_time)?);
            row.push(format_timestamp(start, record.end_time)?);
        }
        writer.write_record(&row)?;
    }

    finish_csv(writer)
}

/// CSV table of denied passengers
pub fn denied_csv(result: &SimulationResult, start_date: Option<NaiveDate>) -> SimResult<String> {
    let mut writer = Writer::from_writer(Vec::new());
    let mut header = vec!["passenger", "arrival_time"];
    if start_date.is_some() {
        header.push("arrived_at");
    }
    writer.write_record(&header)?;

    for record in &result.denied {
        let mut row = vec![record.passenger.to_string(), format!("{:.4}", record.arrival_time)];
        if let Some(start) = start_date {
            row.push(format_timestamp(start, record.arrival_time)?);
        }
        writer.write_record(&row)?;
    }

    finish_csv(writer)
}

/// Render a result in the requested format
pub fn render(
    result: &SimulationResult,
    format: OutputFormat,
    start_date: Option<NaiveDate>,
) -> SimResult<String> {
    match format {
        OutputFormat::Summary => summary_text(result, start_date),
        OutputFormat::Json => to_json(result),
        OutputFormat::Csv => Ok(format!(
            "# attended\n{}\n# denied\n{}",
            attended_csv(result, start_date)?,
            denied_csv(result, start_date)?
        )),
    }
}
