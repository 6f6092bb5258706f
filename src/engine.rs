use crate::capacity::CapacityTable;
use crate::metrics::MetricsBundle;
use crate::normalize::BookingRecord;
use crate::utils::month_position;
use serde::Serialize;
use std::collections::HashMap;

pub const PORTFOLIO_ROOT_NAME: &str = "Portfolio Total";

/// One node of the rollup tree. Immutable once built; the whole tree is
/// reconstructed from scratch on every aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    pub name: String,
    pub metrics: MetricsBundle,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Depth-first pre-order walk over the node and its descendants.
    pub fn walk(&self, visit: &mut impl FnMut(&HierarchyNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at(&self, depth: usize, visit: &mut impl FnMut(&HierarchyNode, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}

/// How sibling groups at one level are ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrdering {
    /// Order keys first appear in the input. Preserves source-file ordering
    /// for dimensions with no canonical order (properties, business views).
    FirstSeen,
    /// Canonical January..December order regardless of input order, so a
    /// fiscal or partial year still displays chronologically.
    CalendarMonth,
    /// Ascending actual occupancy date, not label text. Lexical label sorts
    /// misorder day labels across month boundaries.
    ChronologicalDay,
}

/// One grouping dimension: how to key a record and how to order the
/// resulting sibling groups.
#[derive(Debug, Clone, Copy)]
pub struct GroupingLevel {
    pub key: fn(&BookingRecord) -> &str,
    pub ordering: GroupOrdering,
}

fn property_key(record: &BookingRecord) -> &str {
    &record.property_name
}

fn month_key(record: &BookingRecord) -> &str {
    &record.month_label
}

fn business_view_key(record: &BookingRecord) -> &str {
    &record.business_view
}

fn day_key(record: &BookingRecord) -> &str {
    &record.day_label
}

/// The fixed dimension order of the report: Hotel, Month, Business View, Day.
pub const GROUPING_LEVELS: [GroupingLevel; 4] = [
    GroupingLevel {
        key: property_key,
        ordering: GroupOrdering::FirstSeen,
    },
    GroupingLevel {
        key: month_key,
        ordering: GroupOrdering::CalendarMonth,
    },
    GroupingLevel {
        key: business_view_key,
        ordering: GroupOrdering::FirstSeen,
    },
    GroupingLevel {
        key: day_key,
        ordering: GroupOrdering::ChronologicalDay,
    },
];

/// Builds the Portfolio -> Hotel -> Month -> Business View -> Day tree.
///
/// All four levels run through one recursive grouped builder parameterized
/// by `GROUPING_LEVELS`; every node's metrics are computed against the same
/// shared capacity table, never a per-node recomputation of the date range.
pub struct HierarchyBuilder<'a> {
    capacity: &'a CapacityTable,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(capacity: &'a CapacityTable) -> Self {
        Self { capacity }
    }

    pub fn build(&self, records: &[BookingRecord]) -> HierarchyNode {
        let refs: Vec<&BookingRecord> = records.iter().collect();
        self.build_node(PORTFOLIO_ROOT_NAME.to_string(), &refs, &GROUPING_LEVELS)
    }

    fn build_node(
        &self,
        name: String,
        records: &[&BookingRecord],
        levels: &[GroupingLevel],
    ) -> HierarchyNode {
        let metrics = MetricsBundle::calculate(records, self.capacity);

        let children = match levels.split_first() {
            None => Vec::new(),
            Some((level, deeper)) => partition(records, level)
                .into_iter()
                .map(|(key, group)| self.build_node(key, &group, deeper))
                .collect(),
        };

        HierarchyNode {
            name,
            metrics,
            children,
        }
    }
}

/// Splits a record subset into ordered `(key, group)` pairs for one level.
fn partition<'r>(
    records: &[&'r BookingRecord],
    level: &GroupingLevel,
) -> Vec<(String, Vec<&'r BookingRecord>)> {
    // 1. Group by key, remembering the order each key first appears.
    let mut seen_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&BookingRecord>> = HashMap::new();

    for &record in records {
        let key = (level.key)(record);
        if !groups.contains_key(key) {
            seen_order.push(key.to_string());
        }
        groups.entry(key.to_string()).or_default().push(record);
    }

    let mut partitions: Vec<(String, Vec<&BookingRecord>)> = seen_order
        .into_iter()
        .map(|key| {
            let group = groups.remove(&key).unwrap();
            (key, group)
        })
        .collect();

    // 2. Apply the level's ordering policy. Sorts are stable, so ties keep
    //    first-seen order.
    match level.ordering {
        GroupOrdering::FirstSeen => {}
        GroupOrdering::CalendarMonth => {
            partitions.sort_by_key(|(key, _)| month_position(key).unwrap_or(usize::MAX));
        }
        GroupOrdering::ChronologicalDay => {
            partitions.sort_by_key(|(_, group)| {
                group.iter().map(|record| record.occupancy_date).min()
            });
        }
    }

    partitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CapacityConfig;
    use crate::utils::{day_label, month_label};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(property: &str, day: NaiveDate, view: &str, occ_ty: f64) -> BookingRecord {
        BookingRecord {
            property_name: property.to_string(),
            occupancy_date: day,
            business_view: view.to_string(),
            month_label: month_label(day),
            day_label: day_label(day),
            occupancy_this_year: occ_ty,
            occupancy_last_year: 0.0,
            occupancy_two_years_ago: 0.0,
            occupancy_forecast: 0.0,
            revenue_this_year: 0.0,
            revenue_last_year: 0.0,
            revenue_two_years_ago: 0.0,
            revenue_forecast: 0.0,
        }
    }

    fn build(records: &[BookingRecord], config: &CapacityConfig) -> HierarchyNode {
        let min = records.iter().map(|r| r.occupancy_date).min().unwrap();
        let max = records.iter().map(|r| r.occupancy_date).max().unwrap();
        let table = CapacityTable::expand(config, min, max);
        HierarchyBuilder::new(&table).build(records)
    }

    #[test]
    fn test_four_level_nesting() {
        let records = vec![record("Hotel A", date(2024, 1, 5), "Direct", 10.0)];
        let root = build(&records, &CapacityConfig::new().with_property("Hotel A", 100));

        assert_eq!(root.name, PORTFOLIO_ROOT_NAME);
        let hotel = &root.children[0];
        assert_eq!(hotel.name, "Hotel A");
        let month = &hotel.children[0];
        assert_eq!(month.name, "January");
        let view = &month.children[0];
        assert_eq!(view.name, "Direct");
        let day = &view.children[0];
        assert_eq!(day.name, "Jan 05");
        assert!(day.children.is_empty());
    }

    #[test]
    fn test_properties_keep_first_seen_order() {
        let records = vec![
            record("Zeta Hotel", date(2024, 1, 1), "Direct", 1.0),
            record("Alpha Hotel", date(2024, 1, 1), "Direct", 1.0),
            record("Zeta Hotel", date(2024, 1, 2), "Direct", 1.0),
        ];
        let root = build(&records, &CapacityConfig::new());

        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta Hotel", "Alpha Hotel"]);
    }

    #[test]
    fn test_months_sort_to_calendar_order() {
        let records = vec![
            record("Hotel A", date(2024, 3, 1), "Direct", 1.0),
            record("Hotel A", date(2024, 1, 1), "Direct", 1.0),
            record("Hotel A", date(2024, 2, 1), "Direct", 1.0),
        ];
        let root = build(&records, &CapacityConfig::new().with_property("Hotel A", 10));

        let months: Vec<&str> = root.children[0]
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(months, vec!["January", "February", "March"]);
    }

    #[test]
    fn test_days_sort_chronologically_not_lexically() {
        // "Feb 01" < "Jan 31" lexically; chronological order must win.
        let records = vec![
            record("Hotel A", date(2024, 2, 1), "Direct", 1.0),
            record("Hotel A", date(2024, 1, 31), "Direct", 1.0),
        ];
        let root = build(&records, &CapacityConfig::new().with_property("Hotel A", 10));

        let hotel = &root.children[0];
        let january = &hotel.children[0];
        let february = &hotel.children[1];
        assert_eq!(january.children[0].children[0].name, "Jan 31");
        assert_eq!(february.children[0].children[0].name, "Feb 01");
    }

    #[test]
    fn test_business_views_keep_first_seen_order() {
        let records = vec![
            record("Hotel A", date(2024, 1, 1), "Wholesale", 1.0),
            record("Hotel A", date(2024, 1, 1), "Direct", 1.0),
        ];
        let root = build(&records, &CapacityConfig::new().with_property("Hotel A", 10));

        let views: Vec<&str> = root.children[0].children[0]
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(views, vec!["Wholesale", "Direct"]);
    }

    #[test]
    fn test_additivity_across_every_level() {
        let records = vec![
            record("Hotel A", date(2024, 1, 1), "Direct", 10.0),
            record("Hotel A", date(2024, 1, 1), "Group", 4.0),
            record("Hotel A", date(2024, 2, 2), "Direct", 6.0),
            record("Hotel B", date(2024, 1, 3), "Direct", 5.0),
        ];
        let root = build(
            &records,
            &CapacityConfig::new()
                .with_property("Hotel A", 100)
                .with_property("Hotel B", 50),
        );

        assert_eq!(root.metrics.occupancy_this_year, 25.0);
        root.walk(&mut |node, _| {
            if !node.children.is_empty() {
                let child_sum: f64 = node
                    .children
                    .iter()
                    .map(|c| c.metrics.occupancy_this_year)
                    .sum();
                assert!(
                    (child_sum - node.metrics.occupancy_this_year).abs() < 1e-9,
                    "children of '{}' sum to {} but node holds {}",
                    node.name,
                    child_sum,
                    node.metrics.occupancy_this_year
                );
            }
        });
    }

    #[test]
    fn test_build_is_deterministic() {
        let records = vec![
            record("Hotel B", date(2024, 3, 9), "Group", 3.0),
            record("Hotel A", date(2024, 1, 1), "Direct", 10.0),
            record("Hotel A", date(2024, 2, 5), "Wholesale", 7.0),
        ];
        let config = CapacityConfig::new()
            .with_property("Hotel A", 100)
            .with_property("Hotel B", 50);

        assert_eq!(build(&records, &config), build(&records, &config));
    }

    #[test]
    fn test_empty_records_build_bare_root() {
        let table = CapacityTable::default();
        let root = HierarchyBuilder::new(&table).build(&[]);

        assert_eq!(root.name, PORTFOLIO_ROOT_NAME);
        assert!(root.children.is_empty());
        assert_eq!(root.metrics, MetricsBundle::default());
    }
}
