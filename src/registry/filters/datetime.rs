// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Date and time filters: `duration`, `date`
//!
//! Dates are rendered in UTC so that identical input always produces
//! identical output, whatever the host time zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::borrow::Cow;

/// Epoch values at or above this magnitude are milliseconds, below it seconds
const MILLIS_THRESHOLD: f64 = 10_000_000_000.0;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Milliseconds rendered as zero-padded `HH:MM:SS`
///
/// Hours are not capped. Negative, non-finite, non-numeric input and values
/// beyond `u64::MAX` milliseconds pass through.
pub fn duration(input: Cow<'_, Value>) -> Cow<'_, Value> {
    let Some(millis) = input.as_f64().filter(|ms| (0.0..=u64::MAX as f64).contains(ms)) else {
        return input;
    };

    let total_seconds = (millis / 1000.0).floor() as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    Cow::Owned(Value::String(format!("{hours:02}:{minutes:02}:{seconds:02}")))
}

/// Epoch number or date string formatted with strftime tokens
///
/// Unparseable input passes through.
pub fn date<'v>(input: Cow<'v, Value>, format: Option<&str>) -> Cow<'v, Value> {
    let Some(timestamp) = to_datetime(&input) else {
        return input;
    };
    let pattern = translate_format(format.unwrap_or(DEFAULT_DATE_FORMAT));
    Cow::Owned(Value::String(timestamp.format(&pattern).to_string()))
}

fn to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => from_epoch(n.as_f64()?),
        Value::String(s) => parse_date_string(s.trim()),
        _ => None,
    }
}

fn from_epoch(epoch: f64) -> Option<DateTime<Utc>> {
    if !epoch.is_finite() {
        return None;
    }
    let millis = if epoch.abs() >= MILLIS_THRESHOLD {
        epoch
    } else {
        epoch * 1000.0
    };
    DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64)
}

fn parse_date_string(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(epoch) = text.parse::<f64>() {
        return from_epoch(epoch);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
}

/// Map template strftime tokens onto a chrono format string
///
/// Only the supported tokens reach chrono; anything else, including a
/// trailing `%`, is emitted literally.
fn translate_format(format: &str) -> String {
    let mut pattern = String::with_capacity(format.len());
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            pattern.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some(token @ ('Y' | 'm' | 'd' | 'H' | 'I' | 'M' | 'S' | 'p' | 'b' | 'B' | 'a' | 'A')) => {
                chars.next();
                pattern.push('%');
                pattern.push(token);
            }
            Some('Z') => {
                chars.next();
                pattern.push_str("UTC");
            }
            Some('%') => {
                chars.next();
                pattern.push_str("%%");
            }
            Some(other) => {
                chars.next();
                pattern.push_str("%%");
                pattern.push(other);
            }
            None => pattern.push_str("%%"),
        }
    }
    pattern
}
