use chrono::NaiveDateTime;
use serde::Serialize;

use crate::aggregator::GroupedResult;
use crate::classifier::{CalendarEvent, ClassifiedLine};

const NO_MATCH_MESSAGE: &str = "対象の予定は見つかりませんでした。";
const RAW_LISTING_HEADER: &str = "--- 取得した予定 ---";
const MISSING_HEADER: &str = "※ 予定が見つからなかった必須キーワード:";

fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%-m/%-d %H:%M").to_string()
}

/// Build the report as spreadsheet-style rows: one `[action]` header per
/// group, its lines indented with a trailing timestamp, and a blank
/// separator row after each group. A raw listing of every fetched event
/// follows, then a warning block for required keywords that never matched.
pub fn report_rows(
    grouped: &GroupedResult,
    events: &[CalendarEvent],
    missing: &[String],
) -> Vec<String> {
    let mut rows = Vec::new();

    if grouped.is_empty() {
        rows.push(NO_MATCH_MESSAGE.to_string());
        rows.push(String::new());
    } else {
        for (action, lines) in grouped.iter() {
            rows.push(format!("[{action}]"));
            for line in lines {
                rows.push(format!(
                    "    {} ({})",
                    line.description,
                    format_timestamp(line.timestamp)
                ));
            }
            rows.push(String::new());
        }
    }

    rows.push(RAW_LISTING_HEADER.to_string());
    for event in events {
        rows.push(format!(
            "{} {}",
            format_timestamp(event.start_time),
            event.title
        ));
    }

    if !missing.is_empty() {
        rows.push(String::new());
        rows.push(MISSING_HEADER.to_string());
        for keyword in missing {
            rows.push(format!("・{keyword}"));
        }
    }

    rows
}

pub fn render_text(
    grouped: &GroupedResult,
    events: &[CalendarEvent],
    missing: &[String],
) -> String {
    let mut text = report_rows(grouped, events, missing).join("\n");
    text.push('\n');
    text
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    action: &'a str,
    lines: &'a [ClassifiedLine],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    groups: Vec<JsonGroup<'a>>,
    missing_keywords: &'a [String],
    event_count: usize,
}

/// The same report for machine consumers, e.g. a web front end.
pub fn render_json(
    grouped: &GroupedResult,
    events: &[CalendarEvent],
    missing: &[String],
) -> anyhow::Result<String> {
    let report = JsonReport {
        groups: grouped
            .iter()
            .map(|(action, lines)| JsonGroup { action, lines })
            .collect(),
        missing_keywords: missing,
        event_count: events.len(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
