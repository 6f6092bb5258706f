use crate::schema::CapacityConfig;
use crate::utils::dates_in_range;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Per-property, per-date room capacity covering the full reporting window.
///
/// Expanded once per aggregation run from the sparse configuration and shared
/// by every tree node, so all occupancy percentages rest on the same
/// denominator basis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityTable {
    entries: BTreeMap<String, BTreeMap<NaiveDate, u32>>,
}

impl CapacityTable {
    /// Expands the sparse `property -> daily capacity` mapping to one entry
    /// per configured property per date in `[min_date, max_date]` inclusive.
    /// Dates without bookings get entries too; occupancy never accrues on a
    /// date the capacity table does not cover.
    pub fn expand(config: &CapacityConfig, min_date: NaiveDate, max_date: NaiveDate) -> Self {
        let dates = dates_in_range(min_date, max_date);
        let mut entries = BTreeMap::new();

        for (property_name, &capacity) in &config.daily_capacity {
            let per_day: BTreeMap<NaiveDate, u32> =
                dates.iter().map(|&date| (date, capacity)).collect();
            entries.insert(property_name.clone(), per_day);
        }

        Self { entries }
    }

    /// Capacity for a `(property, date)` pair. Unconfigured properties and
    /// out-of-range dates read as 0, contributing nothing to denominators.
    pub fn capacity_for(&self, property_name: &str, date: NaiveDate) -> u32 {
        self.entries
            .get(property_name)
            .and_then(|per_day| per_day.get(&date))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains_property(&self, property_name: &str) -> bool {
        self.entries.contains_key(property_name)
    }

    /// Total number of `(property, date)` entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expansion_cardinality() {
        let config = CapacityConfig::new()
            .with_property("Hotel A", 100)
            .with_property("Hotel B", 80);

        let table = CapacityTable::expand(&config, date(2024, 1, 1), date(2024, 1, 10));

        // 2 properties x 10 days
        assert_eq!(table.len(), 20);
    }

    #[test]
    fn test_covers_dates_without_bookings() {
        let config = CapacityConfig::new().with_property("Hotel A", 100);
        let table = CapacityTable::expand(&config, date(2024, 1, 1), date(2024, 1, 3));

        // Every day in the window carries capacity, bookings or not.
        assert_eq!(table.capacity_for("Hotel A", date(2024, 1, 2)), 100);
    }

    #[test]
    fn test_unconfigured_property_reads_zero() {
        let config = CapacityConfig::new().with_property("Hotel A", 100);
        let table = CapacityTable::expand(&config, date(2024, 1, 1), date(2024, 1, 3));

        assert_eq!(table.capacity_for("Hotel Z", date(2024, 1, 1)), 0);
        assert!(!table.contains_property("Hotel Z"));
    }

    #[test]
    fn test_out_of_range_date_reads_zero() {
        let config = CapacityConfig::new().with_property("Hotel A", 100);
        let table = CapacityTable::expand(&config, date(2024, 1, 1), date(2024, 1, 3));

        assert_eq!(table.capacity_for("Hotel A", date(2024, 1, 4)), 0);
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let config = CapacityConfig::new()
            .with_property("Hotel A", 100)
            .with_property("Hotel B", 80);

        let first = CapacityTable::expand(&config, date(2024, 1, 1), date(2024, 2, 15));
        let second = CapacityTable::expand(&config, date(2024, 1, 1), date(2024, 2, 15));

        assert_eq!(first, second);
    }
}
