//! # Pace Report Builder
//!
//! A library for rolling up flat hotel booking-pace reports into a
//! capacity-adjusted hierarchy of occupancy and revenue metrics.
//!
//! ## Core Concepts
//!
//! - **Booking Record**: one normalized report row: property, occupancy
//!   date, business view, and numeric facts for this year, same time last
//!   year (STLY), two years ago (ST2Y), and forecast horizons
//! - **Capacity Table**: the sparse `property -> rooms per day` configuration
//!   expanded to every date in the reporting window, bookings or not, so
//!   every occupancy percentage shares one denominator basis
//! - **Metrics Bundle**: the computed totals and ratios for one slice of
//!   data; zero denominators always yield 0, never an error or NaN
//! - **Hierarchy**: Portfolio -> Hotel -> Month -> Business View -> Day, one
//!   generic grouped recursion with a per-level ordering policy
//!
//! ## Example
//!
//! ```rust,ignore
//! use pace_report_builder::*;
//!
//! let dataset = read_report_file("uploads/pace-week-14.csv")?;
//! let config = CapacityConfig::new().with_property("The Hyde Dubai (HB8Y1)", 350);
//!
//! let tree = build_pace_report(&dataset, &config)?;
//! println!(
//!     "{}: {:.1}% occupancy on books",
//!     tree.name, tree.metrics.occupancy_percent
//! );
//! for hotel in &tree.children {
//!     println!("  {}: {:.0} rooms", hotel.name, hotel.metrics.occupancy_this_year);
//! }
//! ```

pub mod capacity;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod metrics;
pub mod normalize;
pub mod schema;
pub mod store;
pub mod summary;
pub mod utils;

pub use capacity::CapacityTable;
pub use engine::{
    GroupOrdering, GroupingLevel, HierarchyBuilder, HierarchyNode, GROUPING_LEVELS,
    PORTFOLIO_ROOT_NAME,
};
pub use error::{PaceReportError, Result};
pub use ingestion::{read_report, read_report_file};
pub use metrics::MetricsBundle;
pub use normalize::{date_range, normalize_dataset, BookingRecord};
pub use schema::*;
pub use store::{DatasetStore, InMemoryDatasetStore, StoreError};
pub use summary::{property_summaries, PropertySummary};
pub use utils::*;

use log::{debug, info, warn};

pub struct PaceReportProcessor;

impl PaceReportProcessor {
    /// Runs the full pipeline: normalize rows, expand capacity over the
    /// observed date range, build the rollup tree.
    ///
    /// Fails with [`PaceReportError::EmptyDataset`] when there are no rows,
    /// [`PaceReportError::MissingColumn`] when a grouping column is absent,
    /// and [`PaceReportError::MalformedDate`] when an occupancy date does not
    /// parse. Nothing partial is ever returned.
    pub fn process(dataset: &RawDataset, config: &CapacityConfig) -> Result<HierarchyNode> {
        if dataset.is_empty() {
            return Err(PaceReportError::EmptyDataset);
        }

        let records = normalize_dataset(dataset)?;

        info!("Aggregating pace report with {} rows", records.len());

        let (min_date, max_date) =
            date_range(&records).ok_or(PaceReportError::EmptyDataset)?;
        debug!("Reporting window {} to {}", min_date, max_date);

        warn_unconfigured_properties(&records, config);

        let capacity = CapacityTable::expand(config, min_date, max_date);
        debug!(
            "Expanded capacity for {} properties to {} entries",
            config.len(),
            capacity.len()
        );

        let builder = HierarchyBuilder::new(&capacity);
        Ok(builder.build(&records))
    }
}

pub fn build_pace_report(dataset: &RawDataset, config: &CapacityConfig) -> Result<HierarchyNode> {
    PaceReportProcessor::process(dataset, config)
}

/// A property in the data but not in the capacity configuration gets a 0
/// denominator everywhere it appears. That is a configuration mistake the
/// operator needs to see, not an engine error.
fn warn_unconfigured_properties(records: &[BookingRecord], config: &CapacityConfig) {
    let mut flagged: Vec<&str> = Vec::new();
    for record in records {
        if config.capacity_of(&record.property_name).is_none()
            && !flagged.contains(&record.property_name.as_str())
        {
            flagged.push(&record.property_name);
            warn!(
                "Property '{}' has no capacity configured; occupancy percentages for it will read 0",
                record.property_name
            );
        }
    }
}
