//! Pure reshaping of raw provider payloads into each product's output shape.
//!
//! Every function here is a deterministic function of its input. Fields named in a
//! product's allowlist always appear in the output (as `null` when the provider omitted
//! them) and nothing else does.

use serde_json::{Number, Value};

use crate::config::fields;
use crate::error::Result;
use crate::fetch::decode::{first_element, into_object, into_rows, round2};
use crate::records::{Record, Series, Table};

/// Keep exactly `allowlist`, in allowlist order.
pub fn filter_record(mut raw: Record, allowlist: &[&str]) -> Record {
    allowlist
        .iter()
        .map(|field| {
            let value = raw.remove(*field).unwrap_or(Value::Null);
            (field.to_string(), value)
        })
        .collect()
}

/// Convert fractional fields to percentages rounded to two places.
pub fn scale_percent_fields(record: &mut Record, percent_fields: &[&str]) {
    for field in percent_fields {
        if let Some(value) = record.get_mut(*field) {
            *value = to_percent(value);
        }
    }
}

/// Convert every field whose name marks it as a percentage (`...Percent...`).
pub fn scale_percent_named_fields(record: &mut Record) {
    for (field, value) in record.iter_mut() {
        if field.contains("Percent") {
            *value = to_percent(value);
        }
    }
}

fn to_percent(value: &Value) -> Value {
    if let Some(int) = value.as_i64() {
        return Value::from(int.saturating_mul(100));
    }
    match value.as_f64() {
        Some(float) => float_value(round2(float * 100.0)),
        None => value.clone(),
    }
}

fn float_value(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Allowlisted stats; `...Percent` fields are scaled, ratios such as `dividendYield` pass through.
pub fn key_stats(raw: Value) -> Result<Record> {
    let mut record = filter_record(into_object(raw, "stats")?, fields::KEY_STATS);
    scale_percent_named_fields(&mut record);
    Ok(record)
}

/// Ratios rounded to two places; profit margin expressed as a percentage.
pub fn advanced_stats(raw: Value) -> Result<Record> {
    let mut record = filter_record(into_object(raw, "advanced-stats")?, fields::ADVANCED_STATS);
    for (field, value) in record.iter_mut() {
        if fields::ADVANCED_STATS_PERCENT.contains(&field.as_str()) {
            *value = to_percent(value);
        } else if value.is_f64() {
            if let Some(float) = value.as_f64() {
                *value = float_value(round2(float));
            }
        }
    }
    Ok(record)
}

pub fn company(raw: Value) -> Result<Record> {
    Ok(filter_record(into_object(raw, "company")?, fields::COMPANY))
}

/// Per-period rows projected onto `allowlist`, input order preserved.
pub fn filtered_table(raw: Value, allowlist: &[&str], path: &str) -> Result<Table> {
    Ok(Table::with_columns(allowlist, into_rows(raw, path)?))
}

/// Rows kept whole; columns are the union of keys seen.
pub fn open_table(raw: Value, path: &str) -> Result<Table> {
    Ok(Table::from_records(into_rows(raw, path)?))
}

/// Earnings rows with `fiscalEndDate` reported as `reportDate`.
pub fn earnings(raw: Value) -> Result<Table> {
    let rows = into_rows(raw, "earnings")?.into_iter().map(|row| {
        let mut renamed = Record::new();
        for (key, value) in row {
            let key = if key == "fiscalEndDate" {
                "reportDate".to_string()
            } else {
                key
            };
            renamed.insert(key, value);
        }
        renamed
    });
    Ok(Table::from_records(rows))
}

pub fn fund_ownership(raw: Value) -> Result<Table> {
    let rows = into_rows(raw, "fund-ownership")?.into_iter().map(|mut row| {
        let report_date = row.get("report_date").cloned().unwrap_or(Value::Null);
        row.insert("reportDate".to_string(), report_date);
        row
    });
    Ok(Table::with_columns(fields::OWNERSHIP, rows))
}

pub fn institutional_ownership(raw: Value) -> Result<Table> {
    filtered_table(raw, fields::OWNERSHIP, "institutional-ownership")
}

/// The most recent consensus estimate, unfiltered.
pub fn estimates(raw: Value) -> Result<Value> {
    first_element(raw, "estimates")
}

/// Latest recommendation period with collapsed `buy`, `sell` and `hold` counts.
pub fn recommendation_trends(raw: Value) -> Result<Record> {
    let mut record = into_object(
        first_element(raw, "recommendation-trends")?,
        "recommendation-trends[0]",
    )?;

    let buy = add_counts(record.get("ratingBuy"), record.get("ratingOverweight"));
    let sell = add_counts(record.get("ratingSell"), record.get("ratingUnderweight"));
    let hold = record.get("ratingHold").cloned().unwrap_or(Value::Null);

    record.insert("buy".to_string(), buy);
    record.insert("sell".to_string(), sell);
    record.insert("hold".to_string(), hold);
    Ok(record)
}

fn add_counts(left: Option<&Value>, right: Option<&Value>) -> Value {
    let (Some(left), Some(right)) = (left, right) else {
        return Value::Null;
    };
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return Value::from(a.saturating_add(b));
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => float_value(a + b),
        _ => Value::Null,
    }
}

/// Previous session's bar as labelled values in daily-bar order.
pub fn previous_day(raw: Value) -> Result<Series> {
    let mut record = into_object(raw, "previous")?;
    record.remove("symbol");
    Ok(Series::new(filter_record(record, fields::DAILY)))
}

pub fn peers(raw: Value) -> Record {
    let mut record = Record::new();
    record.insert("peers".to_string(), raw);
    record
}

pub fn news(raw: Value) -> Result<Table> {
    filtered_table(raw, fields::NEWS, "news")
}

pub fn dividends(raw: Value) -> Result<Table> {
    filtered_table(raw, fields::DIVIDENDS, "dividends")
}

/// Chart bars; intraday ranges carry a `minute` column instead of daily change fields.
pub fn historical_prices(raw: Value, intraday: bool) -> Result<Table> {
    let allowlist = if intraday {
        fields::MINUTE
    } else {
        fields::DAILY
    };
    filtered_table(raw, allowlist, "chart")
}
