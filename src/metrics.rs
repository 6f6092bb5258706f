use crate::capacity::CapacityTable;
use crate::normalize::BookingRecord;
use serde::Serialize;

/// Computed metrics for one tree node. Every field is a concrete number;
/// an empty subset or a zero denominator yields 0, never null or NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsBundle {
    pub occupancy_this_year: f64,
    pub occupancy_last_year: f64,
    pub occupancy_two_years_ago: f64,
    pub occupancy_forecast: f64,
    pub revenue_this_year: f64,
    pub revenue_last_year: f64,
    pub revenue_two_years_ago: f64,
    pub revenue_forecast: f64,
    /// Sum of room capacity over the subset's joined (property, date) pairs.
    pub total_available_rooms: f64,
    pub occupancy_percent: f64,
    pub occupancy_vs_last_year: f64,
    pub adr_this_year: f64,
}

impl MetricsBundle {
    /// Computes the metric set for a subset of records against the shared
    /// capacity table.
    ///
    /// Each record joins to its capacity entry by `(property, date)`; records
    /// with no matching entry contribute 0 capacity but their facts still
    /// count toward the numerators.
    pub fn calculate(records: &[&BookingRecord], capacity: &CapacityTable) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut bundle = Self::default();

        for record in records {
            bundle.occupancy_this_year += record.occupancy_this_year;
            bundle.occupancy_last_year += record.occupancy_last_year;
            bundle.occupancy_two_years_ago += record.occupancy_two_years_ago;
            bundle.occupancy_forecast += record.occupancy_forecast;
            bundle.revenue_this_year += record.revenue_this_year;
            bundle.revenue_last_year += record.revenue_last_year;
            bundle.revenue_two_years_ago += record.revenue_two_years_ago;
            bundle.revenue_forecast += record.revenue_forecast;
            bundle.total_available_rooms +=
                capacity.capacity_for(&record.property_name, record.occupancy_date) as f64;
        }

        bundle.occupancy_percent = ratio_or_zero(
            bundle.occupancy_this_year,
            bundle.total_available_rooms,
        ) * 100.0;
        bundle.occupancy_vs_last_year = ratio_or_zero(
            bundle.occupancy_this_year - bundle.occupancy_last_year,
            bundle.occupancy_last_year,
        ) * 100.0;
        bundle.adr_this_year =
            ratio_or_zero(bundle.revenue_this_year, bundle.occupancy_this_year);

        bundle
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
