use anyhow::{bail, Context};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::classifier::CalendarEvent;

/// Resolve the half-open date range [first of month, first of next month)
/// for the requested calendar month. Year and month default to the current
/// month when absent; a month outside 1..=12 is a configuration error.
pub fn month_range(
    year: Option<i32>,
    month: Option<u32>,
) -> anyhow::Result<(NaiveDateTime, NaiveDateTime)> {
    let today = Local::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let start = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => bail!("invalid year/month: {year}-{month}"),
    };
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first day of the following month is always valid");

    Ok((
        start.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
        end.and_hms_opt(0, 0, 0).expect("midnight is always valid"),
    ))
}

/// Load a calendar event export: a JSON array of `{"title", "start"}`
/// objects. A missing or unparsable file is fatal for the run and surfaced
/// verbatim to the caller.
pub fn load_events(path: &str) -> anyhow::Result<Vec<CalendarEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read events file '{path}'"))?;
    let events: Vec<CalendarEvent> = serde_json::from_str(&content)
        .with_context(|| format!("cannot parse events file '{path}'"))?;
    log::info!("loaded {} event(s) from {path}", events.len());
    Ok(events)
}

/// Events starting within [start, end), sorted by start time. The host
/// calendar API returned events chronologically; downstream grouping relies
/// on the caller providing that order, so it is restored here.
pub fn events_between(
    events: Vec<CalendarEvent>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<CalendarEvent> {
    let mut selected: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|e| e.start_time >= start && e.start_time < end)
        .collect();
    selected.sort_by_key(|e| e.start_time);
    selected
}
