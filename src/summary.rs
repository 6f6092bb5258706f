use crate::normalize::BookingRecord;
use serde::Serialize;

/// One row of the portfolio summary view: booked position and average daily
/// rate per property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySummary {
    pub property_name: String,
    pub occupancy_this_year: f64,
    pub revenue_this_year: f64,
    /// Booked revenue divided by booked occupancy, 0 when nothing is booked.
    pub adr_this_year: f64,
}

/// Per-property totals in first-seen order. Capacity plays no part here;
/// the summary view reports booked position only.
pub fn property_summaries(records: &[BookingRecord]) -> Vec<PropertySummary> {
    let mut summaries: Vec<PropertySummary> = Vec::new();

    for record in records {
        let index = summaries
            .iter()
            .position(|s| s.property_name == record.property_name)
            .unwrap_or_else(|| {
                summaries.push(PropertySummary {
                    property_name: record.property_name.clone(),
                    occupancy_this_year: 0.0,
                    revenue_this_year: 0.0,
                    adr_this_year: 0.0,
                });
                summaries.len() - 1
            });

        summaries[index].occupancy_this_year += record.occupancy_this_year;
        summaries[index].revenue_this_year += record.revenue_this_year;
    }

    for summary in &mut summaries {
        summary.adr_this_year = if summary.occupancy_this_year != 0.0 {
            summary.revenue_this_year / summary.occupancy_this_year
        } else {
            0.0
        };
    }

    summaries
}
