//! Charts drawn from literal datasets shipped with the dashboard.

use serde_json::{Map, Value};

use super::{DataSource, LoaderSpec};
use crate::chart::{AxisSpec, ChartConfig, Dataset, LegendPosition, TooltipFormat};
use crate::domain::{ChartKind, Unit};
use crate::palette::{CYAN, GREEN, ORANGE, PINK, PURPLE};
use crate::record::MetricRecord;
use crate::transform::{project_series, ChartData};

const LABEL: &str = "label";

const ENERGY_TYPES: [&str; 5] = ["Solar", "Wind", "Hydro", "Thermal", "Other"];

const HOURS: [&str; 24] = [
    "00h", "01h", "02h", "03h", "04h", "05h", "06h", "07h", "08h", "09h", "10h", "11h", "12h",
    "13h", "14h", "15h", "16h", "17h", "18h", "19h", "20h", "21h", "22h", "23h",
];

const EVEN_HOURS: [&str; 12] = [
    "00h", "02h", "04h", "06h", "08h", "10h", "12h", "14h", "16h", "18h", "20h", "22h",
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const GRID_CONSUMPTION_GW: [f64; 12] = [
    32.5, 28.1, 24.3, 26.8, 42.1, 51.2, 58.9, 56.3, 62.1, 68.5, 65.2, 48.9,
];

pub(super) const LOADERS: [LoaderSpec; 11] = [
    LoaderSpec {
        name: "production by type",
        source: DataSource::Embedded(production_by_type_rows),
        target: "productionChart",
        transform: production_by_type,
        configure: production_by_type_chart,
    },
    LoaderSpec {
        name: "hourly production",
        source: DataSource::Embedded(hourly_rows),
        target: "hourlyChart",
        transform: hourly,
        configure: hourly_chart,
    },
    LoaderSpec {
        name: "capacity by region",
        source: DataSource::Embedded(capacity_rows),
        target: "capacityChart",
        transform: capacity,
        configure: capacity_chart,
    },
    LoaderSpec {
        name: "energy split",
        source: DataSource::Embedded(energy_split_rows),
        target: "pieChart",
        transform: energy_split,
        configure: energy_split_chart,
    },
    LoaderSpec {
        name: "yearly production",
        source: DataSource::Embedded(yearly_rows),
        target: "yearlyChart",
        transform: yearly,
        configure: yearly_chart,
    },
    LoaderSpec {
        name: "annual growth",
        source: DataSource::Embedded(growth_rows),
        target: "growthChart",
        transform: growth,
        configure: growth_chart,
    },
    LoaderSpec {
        name: "consumption by sector",
        source: DataSource::Embedded(sector_rows),
        target: "consumptionSectorChart",
        transform: sector,
        configure: sector_chart,
    },
    LoaderSpec {
        name: "consumption by region",
        source: DataSource::Embedded(consumption_region_rows),
        target: "consumptionRegionChart",
        transform: consumption_region,
        configure: consumption_region_chart,
    },
    LoaderSpec {
        name: "hourly consumption",
        source: DataSource::Embedded(consumption_hourly_rows),
        target: "consumptionHourlyChart",
        transform: consumption_hourly,
        configure: consumption_hourly_chart,
    },
    LoaderSpec {
        name: "consumption trend",
        source: DataSource::Embedded(consumption_trend_rows),
        target: "consumptionTrendChart",
        transform: consumption_trend,
        configure: consumption_trend_chart,
    },
    LoaderSpec {
        name: "production balance",
        source: DataSource::Embedded(balance_rows),
        target: "balanceChart",
        transform: balance,
        configure: balance_chart,
    },
];

/// One record per label, with one numeric field per column. Short columns
/// leave the field out.
fn table(labels: &[&str], columns: &[(&str, &[f64])]) -> Vec<MetricRecord> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let mut fields = Map::new();
            fields.insert(LABEL.to_string(), Value::from(*label));
            for (field, values) in columns {
                if let Some(value) = values.get(index) {
                    fields.insert((*field).to_string(), Value::from(*value));
                }
            }
            MetricRecord::new(fields)
        })
        .collect()
}

fn production_by_type_rows() -> Vec<MetricRecord> {
    table(
        &ENERGY_TYPES,
        &[("production", &[342.0, 567.0, 298.0, 145.0, 82.0])],
    )
}

fn production_by_type(records: &[MetricRecord]) -> ChartData {
    project_series(records, LABEL, &[("Production (MW)", "production")])
}

fn production_by_type_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Bar, "Production by type")
        .labels(data.labels)
        .dataset(
            Dataset::category("Production (MW)", values)
                .colors(vec![ORANGE, PURPLE, CYAN, PINK, GREEN]),
        )
        .legend(LegendPosition::Hidden)
        .value_axis(AxisSpec::unit(Unit::Megawatt).from_zero())
        .tooltip(TooltipFormat::value(Unit::Megawatt))
}

fn hourly_rows() -> Vec<MetricRecord> {
    table(
        &HOURS,
        &[
            (
                "production",
                &[
                    850.0, 820.0, 780.0, 750.0, 740.0, 760.0, 810.0, 920.0, 1050.0, 1150.0, 1220.0,
                    1280.0, 1300.0, 1310.0, 1290.0, 1250.0, 1180.0, 1100.0, 1020.0, 950.0, 900.0,
                    880.0, 850.0, 830.0,
                ],
            ),
            (
                "consumption",
                &[
                    1100.0, 1080.0, 1050.0, 1020.0, 1000.0, 1050.0, 1150.0, 1250.0, 1350.0, 1400.0,
                    1420.0, 1380.0, 1350.0, 1320.0, 1300.0, 1320.0, 1350.0, 1380.0, 1400.0, 1350.0,
                    1280.0, 1200.0, 1150.0, 1100.0,
                ],
            ),
        ],
    )
}

fn hourly(records: &[MetricRecord]) -> ChartData {
    project_series(
        records,
        LABEL,
        &[
            ("Total production", "production"),
            ("Consumption", "consumption"),
        ],
    )
}

fn hourly_chart(data: ChartData) -> ChartConfig {
    let production = data.values(0).to_vec();
    let consumption = data.values(1).to_vec();
    ChartConfig::new(ChartKind::Line, "Hourly production")
        .labels(data.labels)
        .dataset(
            Dataset::category("Total production", production)
                .color(CYAN)
                .filled(),
        )
        .dataset(Dataset::category("Consumption", consumption).color(PINK).filled())
        .legend(LegendPosition::Top)
        .value_axis(AxisSpec::unit(Unit::Megawatt).from_zero())
}

fn capacity_rows() -> Vec<MetricRecord> {
    table(
        &[
            "Hauts-de-France",
            "Auvergne-Rhône-Alpes",
            "Occitanie",
            "Nouvelle-Aquitaine",
            "PACA",
            "Grand-Est",
            "Bretagne",
        ],
        &[("capacity", &[4.5, 3.8, 3.2, 2.9, 2.6, 2.3, 2.1])],
    )
}

fn capacity(records: &[MetricRecord]) -> ChartData {
    project_series(records, LABEL, &[("Capacity (GW)", "capacity")])
}

fn capacity_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Bar, "Capacity by region")
        .labels(data.labels)
        .dataset(Dataset::category("Capacity (GW)", values).color(PURPLE))
        .horizontal()
        .legend(LegendPosition::Hidden)
        .value_axis(AxisSpec::unit(Unit::Gigawatt).from_zero())
        .tooltip(TooltipFormat::value(Unit::Gigawatt))
}

fn energy_split_rows() -> Vec<MetricRecord> {
    table(&ENERGY_TYPES, &[("share", &[28.0, 36.0, 19.0, 9.0, 8.0])])
}

fn energy_split(records: &[MetricRecord]) -> ChartData {
    project_series(records, LABEL, &[("Share (%)", "share")])
}

fn energy_split_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Doughnut, "Energy split")
        .labels(data.labels)
        .dataset(
            Dataset::category("Share (%)", values).colors(vec![ORANGE, PURPLE, CYAN, PINK, GREEN]),
        )
        .tooltip(TooltipFormat::LabelValue {
            unit: Unit::Percent,
        })
}

fn yearly_rows() -> Vec<MetricRecord> {
    table(
        &["2018", "2019", "2020", "2021", "2022", "2023", "2024"],
        &[
            ("total", &[450.0, 512.0, 598.0, 687.0, 756.0, 842.0, 945.0]),
            ("solar", &[45.0, 62.0, 89.0, 125.0, 178.0, 245.0, 342.0]),
        ],
    )
}

fn yearly(records: &[MetricRecord]) -> ChartData {
    project_series(
        records,
        LABEL,
        &[("Total production", "total"), ("Solar production", "solar")],
    )
}

fn yearly_chart(data: ChartData) -> ChartConfig {
    let total = data.values(0).to_vec();
    let solar = data.values(1).to_vec();
    ChartConfig::new(ChartKind::Line, "Production by year")
        .labels(data.labels)
        .dataset(Dataset::category("Total production", total).color(CYAN).filled())
        .dataset(
            Dataset::category("Solar production", solar)
                .color(ORANGE)
                .filled()
                .dashed(),
        )
        .value_axis(AxisSpec::unit(Unit::Megawatt).from_zero())
}

fn growth_rows() -> Vec<MetricRecord> {
    table(
        &["2019", "2020", "2021", "2022", "2023", "2024"],
        &[("growth", &[13.8, 16.8, 14.9, 10.0, 11.4, 12.2])],
    )
}

fn growth(records: &[MetricRecord]) -> ChartData {
    project_series(records, LABEL, &[("Growth (%)", "growth")])
}

fn growth_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Bar, "Annual growth")
        .labels(data.labels)
        .dataset(Dataset::category("Growth (%)", values).color(CYAN))
        .horizontal()
        .legend(LegendPosition::Hidden)
        .value_axis(AxisSpec::unit(Unit::Percent).fixed(0))
        .tooltip(TooltipFormat::Value {
            unit: Some(Unit::Percent),
            decimals: Some(1),
        })
}

fn sector_rows() -> Vec<MetricRecord> {
    table(
        &["Industry", "Residential", "Tertiary", "Agriculture", "Transport"],
        &[("consumption", &[189.0, 152.0, 98.0, 42.0, 67.0])],
    )
}

fn sector(records: &[MetricRecord]) -> ChartData {
    project_series(records, LABEL, &[("Consumption (TWh)", "consumption")])
}

fn sector_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Bar, "Consumption by sector")
        .labels(data.labels)
        .dataset(
            Dataset::category("Consumption (TWh)", values)
                .colors(vec![PINK, CYAN, PURPLE, GREEN, ORANGE]),
        )
        .horizontal()
        .legend(LegendPosition::Hidden)
        .value_axis(AxisSpec::unit(Unit::TerawattHour))
        .tooltip(TooltipFormat::Value {
            unit: Some(Unit::TerawattHour),
            decimals: Some(1),
        })
}

fn consumption_region_rows() -> Vec<MetricRecord> {
    table(
        &[
            "Île-de-France",
            "Auvergne-Rhône-Alpes",
            "Hauts-de-France",
            "Nouvelle-Aquitaine",
            "Provence-Alpes-Côte d'Azur",
        ],
        &[("consumption", &[152.0, 98.0, 87.0, 76.0, 64.0])],
    )
}

fn consumption_region(records: &[MetricRecord]) -> ChartData {
    project_series(records, LABEL, &[("Consumption (TWh)", "consumption")])
}

fn consumption_region_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Radar, "Consumption by region")
        .labels(data.labels)
        .dataset(Dataset::category("Consumption (TWh)", values).color(CYAN).filled())
        .value_axis(AxisSpec::unit(Unit::TerawattHour).from_zero())
}

fn consumption_hourly_rows() -> Vec<MetricRecord> {
    table(&EVEN_HOURS, &[("consumption", &GRID_CONSUMPTION_GW)])
}

fn consumption_hourly(records: &[MetricRecord]) -> ChartData {
    project_series(records, LABEL, &[("Consumption (GW)", "consumption")])
}

fn consumption_hourly_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Line, "Hourly consumption")
        .labels(data.labels)
        .dataset(Dataset::category("Consumption (GW)", values).color(PINK).filled())
        .legend(LegendPosition::Hidden)
        .value_axis(AxisSpec::unit(Unit::Gigawatt).from_zero())
}

fn consumption_trend_rows() -> Vec<MetricRecord> {
    table(
        &MONTHS,
        &[
            (
                "current",
                &[
                    548.0, 521.0, 478.0, 421.0, 365.0, 342.0, 378.0, 385.0, 412.0, 468.0, 521.0,
                    562.0,
                ],
            ),
            (
                "previous",
                &[
                    542.0, 515.0, 472.0, 428.0, 372.0, 348.0, 385.0, 392.0, 418.0, 475.0, 528.0,
                    555.0,
                ],
            ),
        ],
    )
}

fn consumption_trend(records: &[MetricRecord]) -> ChartData {
    project_series(
        records,
        LABEL,
        &[("Consumption 2024", "current"), ("Average 2023", "previous")],
    )
}

fn consumption_trend_chart(data: ChartData) -> ChartConfig {
    let current = data.values(0).to_vec();
    let previous = data.values(1).to_vec();
    ChartConfig::new(ChartKind::Line, "Consumption trend (12 months)")
        .labels(data.labels)
        .dataset(Dataset::category("Consumption 2024", current).color(ORANGE).filled())
        .dataset(Dataset::category("Average 2023", previous).color(GREEN).dashed())
        .value_axis(AxisSpec::unit(Unit::TerawattHour).from_zero())
}

fn balance_rows() -> Vec<MetricRecord> {
    table(
        &EVEN_HOURS,
        &[
            (
                "production",
                &[
                    38.2, 35.8, 32.1, 36.5, 45.2, 58.3, 72.1, 68.9, 75.3, 82.1, 78.5, 58.2,
                ],
            ),
            ("consumption", &GRID_CONSUMPTION_GW),
        ],
    )
}

fn balance(records: &[MetricRecord]) -> ChartData {
    project_series(
        records,
        LABEL,
        &[
            ("Production (GW)", "production"),
            ("Consumption (GW)", "consumption"),
        ],
    )
}

fn balance_chart(data: ChartData) -> ChartConfig {
    let production = data.values(0).to_vec();
    let consumption = data.values(1).to_vec();
    ChartConfig::new(ChartKind::Line, "Consumption vs production")
        .labels(data.labels)
        .dataset(Dataset::category("Production (GW)", production).color(CYAN).filled())
        .dataset(Dataset::category("Consumption (GW)", consumption).color(PINK).filled())
        .value_axis(AxisSpec::unit(Unit::Gigawatt).from_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Orientation, Stroke};

    fn build(spec: &LoaderSpec) -> ChartConfig {
        let DataSource::Embedded(rows) = spec.source else {
            panic!("{} is not embedded", spec.name);
        };
        (spec.configure)((spec.transform)(&rows()))
    }

    #[test]
    fn every_dataset_matches_its_labels() {
        for spec in &LOADERS {
            let config = build(spec);
            assert!(!config.labels.is_empty(), "{}", spec.name);
            for dataset in &config.datasets {
                assert_eq!(
                    dataset.category_values().len(),
                    config.labels.len(),
                    "{} / {}",
                    spec.name,
                    dataset.label
                );
            }
        }
    }

    #[test]
    fn production_by_type_is_an_unlabelled_bar() {
        let config = build(&LOADERS[0]);
        assert_eq!(config.labels, ENERGY_TYPES);
        assert_eq!(config.datasets[0].category_values(), &[342.0, 567.0, 298.0, 145.0, 82.0]);
        assert_eq!(config.legend, LegendPosition::Hidden);
        assert_eq!(config.value_axis.tick(300.0), "300 MW");
        assert_eq!(config.datasets[0].color_at(0), ORANGE);
    }

    #[test]
    fn pie_shares_add_to_a_hundred() {
        let config = build(&LOADERS[3]);
        let total: f64 = config.datasets[0].category_values().iter().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(config.tooltip.format("Wind", 36.0), "Wind: 36%");
    }

    #[test]
    fn growth_ticks_and_tooltips_differ_in_precision() {
        let config = build(&LOADERS[5]);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.value_axis.tick(12.0), "12%");
        assert_eq!(config.tooltip.format("2019", 13.8), "13.8%");
    }

    #[test]
    fn previous_year_trend_is_dashed_and_open() {
        let config = build(&LOADERS[9]);
        let previous = &config.datasets[1];
        assert_eq!(previous.stroke, Stroke::Dashed);
        assert!(!previous.fill);
        assert_eq!(previous.color_at(0), GREEN);
    }

    #[test]
    fn balance_reuses_the_hourly_consumption_curve() {
        let balance = build(&LOADERS[10]);
        let hourly = build(&LOADERS[8]);
        assert_eq!(
            balance.datasets[1].category_values(),
            hourly.datasets[0].category_values()
        );
    }
}
