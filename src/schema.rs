use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const COL_PROPERTY_NAME: &str = "Property Name";
pub const COL_OCCUPANCY_DATE: &str = "Occupancy Date";
pub const COL_BUSINESS_VIEW: &str = "Business View";

pub const COL_OCC_THIS_YEAR: &str = "Occupancy On Books This Year";
pub const COL_OCC_STLY: &str = "Occupancy On Books STLY";
pub const COL_OCC_ST2Y: &str = "Occupancy On Books ST2Y";
pub const COL_OCC_FORECAST: &str = "Forecasted Occupancy This Year";
pub const COL_REV_THIS_YEAR: &str = "Booked Room Revenue This Year";
pub const COL_REV_STLY: &str = "Booked Room Revenue STLY";
pub const COL_REV_ST2Y: &str = "Booked Room Revenue ST2Y";
pub const COL_REV_FORECAST: &str = "Forecasted Room Revenue This Year";

/// Columns the grouping dimensions depend on. Absence is fatal.
pub const REQUIRED_COLUMNS: [&str; 3] =
    [COL_PROPERTY_NAME, COL_OCCUPANCY_DATE, COL_BUSINESS_VIEW];

/// Numeric fact columns. A missing column or an unparsable cell reads as 0.
pub const FACT_COLUMNS: [&str; 8] = [
    COL_OCC_THIS_YEAR,
    COL_OCC_STLY,
    COL_OCC_ST2Y,
    COL_OCC_FORECAST,
    COL_REV_THIS_YEAR,
    COL_REV_STLY,
    COL_REV_ST2Y,
    COL_REV_FORECAST,
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CapacityConfig {
    #[schemars(
        description = "Fixed number of sellable rooms per day, keyed by the exact property name appearing in the report data (case-sensitive)"
    )]
    pub daily_capacity: BTreeMap<String, u32>,
}

impl CapacityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, property_name: impl Into<String>, capacity: u32) -> Self {
        self.daily_capacity.insert(property_name.into(), capacity);
        self
    }

    pub fn capacity_of(&self, property_name: &str) -> Option<u32> {
        self.daily_capacity.get(property_name).copied()
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.daily_capacity.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.daily_capacity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily_capacity.is_empty()
    }
}

/// One uploaded report held as raw cell text: a column list plus rows aligned
/// to it, the shape the storage collaborator hands over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawDataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row. Ragged rows are tolerated: short rows read as empty
    /// cells (which normalize to 0 for facts), extra cells are dropped.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.truncate(self.columns.len());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Cell text at (row, column), or None when the column is unknown or the
    /// row is too short to reach it.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(index))
            .map(String::as_str)
    }
}
