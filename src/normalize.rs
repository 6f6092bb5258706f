use crate::error::{PaceReportError, Result};
use crate::schema::{
    RawDataset, COL_BUSINESS_VIEW, COL_OCCUPANCY_DATE, COL_OCC_FORECAST, COL_OCC_ST2Y,
    COL_OCC_STLY, COL_OCC_THIS_YEAR, COL_PROPERTY_NAME, COL_REV_FORECAST, COL_REV_ST2Y,
    COL_REV_STLY, COL_REV_THIS_YEAR, REQUIRED_COLUMNS,
};
use crate::utils::{day_label, month_label};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One normalized booking-pace row. Facts are always concrete numbers;
/// the two labels exist purely as grouping keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRecord {
    pub property_name: String,
    pub occupancy_date: NaiveDate,
    pub business_view: String,
    pub month_label: String,
    pub day_label: String,
    pub occupancy_this_year: f64,
    pub occupancy_last_year: f64,
    pub occupancy_two_years_ago: f64,
    pub occupancy_forecast: f64,
    pub revenue_this_year: f64,
    pub revenue_last_year: f64,
    pub revenue_two_years_ago: f64,
    pub revenue_forecast: f64,
}

/// Coerces a raw dataset into typed records.
///
/// Required grouping columns are checked before any row is touched, so a
/// malformed upload fails whole rather than producing a partial result.
/// Missing or non-numeric fact cells read as 0; an unparsable occupancy
/// date is an error, never a default.
pub fn normalize_dataset(dataset: &RawDataset) -> Result<Vec<BookingRecord>> {
    for column in REQUIRED_COLUMNS {
        if !dataset.has_column(column) {
            return Err(PaceReportError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::with_capacity(dataset.row_count());

    for row in 0..dataset.row_count() {
        let property_name = grouping_cell(dataset, row, COL_PROPERTY_NAME);
        let business_view = grouping_cell(dataset, row, COL_BUSINESS_VIEW);

        let date_cell = dataset.cell(row, COL_OCCUPANCY_DATE).unwrap_or("").trim();
        let occupancy_date = parse_occupancy_date(date_cell).ok_or_else(|| {
            PaceReportError::MalformedDate {
                column: COL_OCCUPANCY_DATE.to_string(),
                value: date_cell.to_string(),
            }
        })?;

        records.push(BookingRecord {
            property_name,
            business_view,
            month_label: month_label(occupancy_date),
            day_label: day_label(occupancy_date),
            occupancy_date,
            occupancy_this_year: fact_cell(dataset, row, COL_OCC_THIS_YEAR),
            occupancy_last_year: fact_cell(dataset, row, COL_OCC_STLY),
            occupancy_two_years_ago: fact_cell(dataset, row, COL_OCC_ST2Y),
            occupancy_forecast: fact_cell(dataset, row, COL_OCC_FORECAST),
            revenue_this_year: fact_cell(dataset, row, COL_REV_THIS_YEAR),
            revenue_last_year: fact_cell(dataset, row, COL_REV_STLY),
            revenue_two_years_ago: fact_cell(dataset, row, COL_REV_ST2Y),
            revenue_forecast: fact_cell(dataset, row, COL_REV_FORECAST),
        });
    }

    Ok(records)
}

fn grouping_cell(dataset: &RawDataset, row: usize, column: &str) -> String {
    dataset
        .cell(row, column)
        .unwrap_or("")
        .trim()
        .to_string()
}

fn fact_cell(dataset: &RawDataset, row: usize, column: &str) -> f64 {
    dataset
        .cell(row, column)
        .map(coerce_numeric)
        .unwrap_or(0.0)
}

/// Missing, blank, or non-numeric cells read as 0. Thousands separators are
/// tolerated since spreadsheet exports often carry them.
fn coerce_numeric(value: &str) -> f64 {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Accepts the date shapes spreadsheet exports produce: a plain date, a
/// date-time, or an RFC 3339 timestamp.
fn parse_occupancy_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    None
}

/// Min and max occupancy dates across all records, or None when empty.
pub fn date_range(records: &[BookingRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = records.iter().map(|r| r.occupancy_date).min()?;
    let max = records.iter().map(|r| r.occupancy_date).max()?;
    Some((min, max))
}
