//! Data shaping between API records and chart series.
//!
//! Every function here is pure: records in, labels and values out. Grouping
//! keeps first-seen key order unless stated otherwise, and any missing numeric
//! field counts as zero.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::record::MetricRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Labels plus one or more named series, each holding one value per label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub const fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.push(Series {
            name: name.into(),
            values,
        });
        self
    }

    pub fn values(&self, index: usize) -> &[f64] {
        self.series
            .get(index)
            .map_or(&[][..], |series| series.values.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn project(records: &[MetricRecord], field: &str) -> Vec<f64> {
    records.iter().map(|record| record.number(field)).collect()
}

pub fn project_text(records: &[MetricRecord], field: &str) -> Vec<String> {
    records.iter().map(|record| record.text(field)).collect()
}

/// Labels from `label_field` plus one series per `(name, field)` column.
pub fn project_series(
    records: &[MetricRecord],
    label_field: &str,
    columns: &[(&str, &str)],
) -> ChartData {
    columns.iter().fold(
        ChartData::new(project_text(records, label_field)),
        |data, (name, field)| data.with_series(*name, project(records, field)),
    )
}

/// Sums `field` per distinct `key`, in first-seen key order.
pub fn group_sum(records: &[MetricRecord], key: &str, field: &str) -> Vec<(String, f64)> {
    group_by(records, key, field, |total, value| *total += value)
}

/// Keeps the last `field` value seen per distinct `key`, in first-seen key order.
pub fn group_last(records: &[MetricRecord], key: &str, field: &str) -> Vec<(String, f64)> {
    group_by(records, key, field, |slot, value| *slot = value)
}

fn group_by(
    records: &[MetricRecord],
    key: &str,
    field: &str,
    merge: impl Fn(&mut f64, f64),
) -> Vec<(String, f64)> {
    let mut groups: Vec<(String, f64)> = Vec::new();
    for record in records {
        let name = record.text(key);
        let value = record.number(field);
        if let Some((_, slot)) = groups.iter_mut().find(|(existing, _)| *existing == name) {
            merge(slot, value);
        } else {
            groups.push((name, value));
        }
    }
    groups
}

/// A two-key matrix with sorted row and column axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pivot {
    cells: BTreeMap<String, BTreeMap<String, f64>>,
    columns: BTreeSet<String>,
}

impl Pivot {
    pub fn rows(&self) -> Vec<String> {
        self.cells.keys().cloned().collect()
    }

    pub fn columns(&self) -> Vec<String> {
        self.columns.iter().cloned().collect()
    }

    pub fn row(&self, row: &str) -> Option<&BTreeMap<String, f64>> {
        self.cells.get(row)
    }

    /// Cell value; absent cells read zero.
    pub fn value(&self, row: &str, column: &str) -> f64 {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or(0.0)
    }

    /// Values of `row` aligned to [`Pivot::columns`].
    pub fn row_values(&self, row: &str) -> Vec<f64> {
        self.columns
            .iter()
            .map(|column| self.value(row, column))
            .collect()
    }
}

/// Builds a `row_key` × `column_key` matrix of `field`, last write wins.
pub fn pivot(records: &[MetricRecord], row_key: &str, column_key: &str, field: &str) -> Pivot {
    let mut pivot = Pivot::default();
    for record in records {
        let column = record.text(column_key);
        pivot.columns.insert(column.clone());
        pivot
            .cells
            .entry(record.text(row_key))
            .or_default()
            .insert(column, record.number(field));
    }
    pivot
}

/// Stable descending sort by `key`, truncated to `n` items.
pub fn top_n<T>(mut items: Vec<T>, n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
    items.truncate(n);
    items
}

pub fn top_n_by(records: &[MetricRecord], field: &str, n: usize) -> Vec<MetricRecord> {
    top_n(records.to_vec(), n, |record| record.number(field))
}

/// Ascending by `(year, month)`.
pub fn sort_by_period(records: &[MetricRecord]) -> Vec<MetricRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| (record.integer("year"), record.integer("month")));
    sorted
}

/// `YYYY-MM` label for a record with `year` and `month` fields.
pub fn period_label(record: &MetricRecord) -> String {
    format!("{}-{:02}", record.integer("year"), record.integer("month"))
}

/// Divides by a fixed factor chosen for visual fit next to a larger series.
pub fn scale_down(values: &[f64], divisor: f64) -> Vec<f64> {
    values.iter().map(|value| value / divisor).collect()
}

pub fn truncate_label(label: &str, max_chars: usize) -> String {
    label.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::records_from_value;
    use proptest::prelude::*;
    use serde_json::json;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn city_year_pivot_matches_expected_matrix() {
        let records = records_from_value(json!([
            {"city": "A", "year": 2020, "production_mw": 10},
            {"city": "A", "year": 2021, "production_mw": 20},
            {"city": "B", "year": 2020, "production_mw": 5},
        ]));

        let pivot = pivot(&records, "city", "year", "production_mw");

        assert_eq!(pivot.columns(), vec!["2020", "2021"]);
        assert_eq!(pivot.rows(), vec!["A", "B"]);
        assert!(close(pivot.value("A", "2020"), 10.0));
        assert!(close(pivot.value("A", "2021"), 20.0));
        assert!(close(pivot.value("B", "2020"), 5.0));
        assert_eq!(pivot.row("B").map(BTreeMap::len), Some(1));
        assert_eq!(pivot.row_values("B"), vec![5.0, 0.0]);
    }

    #[test]
    fn comparison_sorts_by_total_production_descending() {
        let records = records_from_value(json!([
            {"region": "X", "total_production": 100},
            {"region": "Y", "total_production": 300},
        ]));

        let top = top_n_by(&records, "total_production", 8);
        assert_eq!(project_text(&top, "region"), vec!["Y", "X"]);
    }

    #[test]
    fn group_sum_keeps_first_seen_order_and_zero_defaults() {
        let records = records_from_value(json!([
            {"energy_type": "Wind", "capacity_mw": 120.5},
            {"energy_type": "Solar", "capacity_mw": "80"},
            {"energy_type": "Wind"},
            {"energy_type": "Wind", "capacity_mw": 9.5},
        ]));

        let grouped = group_sum(&records, "energy_type", "capacity_mw");
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "Wind");
        assert!(close(grouped[0].1, 130.0));
        assert_eq!(grouped[1].0, "Solar");
        assert!(close(grouped[1].1, 80.0));
    }

    #[test]
    fn group_last_overwrites() {
        let records = records_from_value(json!([
            {"k": "a", "v": 1},
            {"k": "b", "v": 2},
            {"k": "a", "v": 3},
        ]));
        assert_eq!(
            group_last(&records, "k", "v"),
            vec![("a".to_string(), 3.0), ("b".to_string(), 2.0)]
        );
    }

    #[test]
    fn periods_sort_and_label() {
        let records = records_from_value(json!([
            {"year": "2023", "month": "11"},
            {"year": 2022, "month": 3},
            {"year": 2023, "month": 2},
        ]));
        let labels = sort_by_period(&records)
            .iter()
            .map(period_label)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["2022-03", "2023-02", "2023-11"]);
    }

    #[test]
    fn project_series_aligns_columns() {
        let records = records_from_value(json!([
            {"hour": "00h", "production": 850, "consumption": 1100},
            {"hour": "01h", "production": 820},
        ]));
        let data = project_series(
            &records,
            "hour",
            &[("Production", "production"), ("Consumption", "consumption")],
        );
        assert_eq!(data.labels, vec!["00h", "01h"]);
        assert_eq!(data.values(0), &[850.0, 820.0]);
        assert_eq!(data.values(1), &[1100.0, 0.0]);
        assert!(data.values(2).is_empty());
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_label("Centrale Éolienne du Nord", 15), "Centrale Éolien");
        assert_eq!(truncate_label("Short", 15), "Short");
    }

    proptest! {
        #[test]
        fn grouped_sums_match_filtered_sums(
            rows in prop::collection::vec((0_usize..4, -1000.0_f64..1000.0, any::<bool>()), 0..40),
        ) {
            let keys = ["north", "south", "east", "west"];
            let records = records_from_value(serde_json::Value::Array(
                rows.iter()
                    .map(|(key, value, present)| {
                        if *present {
                            json!({"region": keys[*key], "value": value})
                        } else {
                            json!({"region": keys[*key]})
                        }
                    })
                    .collect(),
            ));

            for (key, total) in group_sum(&records, "region", "value") {
                let expected: f64 = records
                    .iter()
                    .filter(|record| record.text("region") == key)
                    .map(|record| record.number("value"))
                    .sum();
                prop_assert!((total - expected).abs() < 1e-6);
            }
        }

        #[test]
        fn top_n_is_idempotent(
            values in prop::collection::vec(-1.0e6_f64..1.0e6, 0..60),
            n in 1_usize..20,
        ) {
            let once = top_n(values, n, |value| *value);
            let twice = top_n(once.clone(), n, |value| *value);
            prop_assert_eq!(once, twice);
        }
    }
}
