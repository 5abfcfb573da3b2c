use super::{DataSource, LoaderSpec};
use crate::chart::{AxisSpec, ChartConfig, Dataset, LegendPosition, TooltipFormat};
use crate::domain::{ChartKind, Unit};
use crate::palette::{self, CYAN, GREEN, ORANGE, PINK, PURPLE, RED};
use crate::record::MetricRecord;
use crate::transform::{
    group_sum, period_label, pivot, project, project_text, scale_down, sort_by_period, top_n_by,
    truncate_label, ChartData,
};

/// Installation counts share an axis with megawatt totals.
const INSTALLATION_SCALE: f64 = 50.0;

pub(super) const LOADERS: [LoaderSpec; 10] = [
    LoaderSpec {
        name: "production by city",
        source: DataSource::Remote("/production-by-city-year"),
        target: "productionCityYearChart",
        transform: city_year,
        configure: city_year_chart,
    },
    LoaderSpec {
        name: "city comparison",
        source: DataSource::Remote("/city-comparison"),
        target: "cityComparisonChart",
        transform: city_comparison,
        configure: city_comparison_chart,
    },
    LoaderSpec {
        name: "production trend",
        source: DataSource::Remote("/production-trend-5years"),
        target: "productionTrendChart",
        transform: production_trend,
        configure: production_trend_chart,
    },
    LoaderSpec {
        name: "energy mix by city",
        source: DataSource::Remote("/energy-mix-by-city"),
        target: "energyMixCityChart",
        transform: energy_mix,
        configure: energy_mix_chart,
    },
    LoaderSpec {
        name: "optimization",
        source: DataSource::Remote("/optimization-analysis"),
        target: "optimizationChart",
        transform: optimization,
        configure: optimization_chart,
    },
    LoaderSpec {
        name: "distribution efficiency",
        source: DataSource::Remote("/distribution-analysis"),
        target: "distributionEfficiencyChart",
        transform: distribution_efficiency,
        configure: distribution_efficiency_chart,
    },
    LoaderSpec {
        name: "capacity by type",
        source: DataSource::Remote("/capacity-installed"),
        target: "capacityByTypeChart",
        transform: capacity_by_type,
        configure: capacity_by_type_chart,
    },
    LoaderSpec {
        name: "monthly summary",
        source: DataSource::Remote("/monthly-summary"),
        target: "monthlySummaryChart",
        transform: monthly_summary,
        configure: monthly_summary_chart,
    },
    LoaderSpec {
        name: "distribution analysis",
        source: DataSource::Remote("/distribution-analysis"),
        target: "distributionAnalysisChart",
        transform: distribution_analysis,
        configure: distribution_analysis_chart,
    },
    LoaderSpec {
        name: "region capacity",
        source: DataSource::Remote("/regions"),
        target: "regionCapacityChart",
        transform: region_capacity,
        configure: region_capacity_chart,
    },
];

fn city_year(records: &[MetricRecord]) -> ChartData {
    let matrix = pivot(records, "city", "year", "production_mw");
    matrix
        .rows()
        .into_iter()
        .take(5)
        .fold(ChartData::new(matrix.columns()), |data, city| {
            let values = matrix.row_values(&city);
            data.with_series(city, values)
        })
}

fn city_year_chart(data: ChartData) -> ChartConfig {
    let colors = [CYAN, PINK, PURPLE, ORANGE, GREEN];
    ChartConfig::new(ChartKind::Bar, "Production by region (2020+)")
        .labels(data.labels)
        .datasets(
            data.series
                .into_iter()
                .enumerate()
                .map(|(index, series)| {
                    Dataset::category(series.name, series.values).color(colors[index % colors.len()])
                }),
        )
        .value_axis(AxisSpec::unit(Unit::Megawatt))
        .tooltip(TooltipFormat::value(Unit::Megawatt))
}

fn city_comparison(records: &[MetricRecord]) -> ChartData {
    let top = top_n_by(records, "total_production", 8);
    ChartData::new(project_text(&top, "region"))
        .with_series("Total production (MW)", project(&top, "total_production"))
        .with_series(
            "Installations",
            scale_down(&project(&top, "nb_installations"), INSTALLATION_SCALE),
        )
}

fn city_comparison_chart(data: ChartData) -> ChartConfig {
    let production = data.values(0).to_vec();
    let installations = data.values(1).to_vec();
    ChartConfig::new(ChartKind::Bar, "Regional comparison")
        .labels(data.labels)
        .dataset(Dataset::category("Total production (MW)", production).color(CYAN))
        .dataset(Dataset::category("Installations", installations).color(PINK))
        .horizontal()
}

fn production_trend(records: &[MetricRecord]) -> ChartData {
    let sorted = sort_by_period(records);
    ChartData::new(sorted.iter().map(period_label).collect())
        .with_series("Average production (MW)", project(&sorted, "avg_production"))
}

fn production_trend_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Line, "Production trend (5 years)")
        .labels(data.labels)
        .dataset(
            Dataset::category("Average production (MW)", values)
                .color(GREEN)
                .filled(),
        )
        .value_axis(AxisSpec::unit(Unit::Megawatt))
        .tooltip(TooltipFormat::value(Unit::Megawatt))
}

fn energy_mix(records: &[MetricRecord]) -> ChartData {
    let rows = &records[..records.len().min(8)];
    ChartData::new(
        rows.iter()
            .map(|row| format!("{} ({})", row.text("energy_type"), row.text("region")))
            .collect(),
    )
    .with_series("Production (MW)", project(rows, "production_mw"))
}

fn energy_mix_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Doughnut, "Energy mix by region")
        .labels(data.labels)
        .dataset(Dataset::category("Production (MW)", values).colors(palette::SOURCES.to_vec()))
        .tooltip(TooltipFormat::LabelValue {
            unit: Unit::Megawatt,
        })
}

fn optimization(records: &[MetricRecord]) -> ChartData {
    let top = top_n_by(records, "capacity_factor", 15);
    ChartData::new(
        top.iter()
            .map(|row| truncate_label(&row.text("plant_name"), 15))
            .collect(),
    )
    .with_series("Capacity factor (%)", project(&top, "capacity_factor"))
}

fn optimization_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Bar, "Plant optimization")
        .labels(data.labels)
        .dataset(Dataset::category("Capacity factor (%)", values).colors(vec![CYAN, PURPLE]))
        .horizontal()
        .legend(LegendPosition::Hidden)
        .value_axis(AxisSpec::unit(Unit::Percent))
        .tooltip(TooltipFormat::Value {
            unit: Some(Unit::Percent),
            decimals: Some(1),
        })
}

fn distribution_efficiency(records: &[MetricRecord]) -> ChartData {
    let top = top_n_by(records, "total_production", 10);
    ChartData::new(project_text(&top, "region"))
        .with_series("Production (MW)", project(&top, "total_production"))
        .with_series("Efficiency (%)", project(&top, "distribution_efficiency"))
}

fn distribution_efficiency_chart(data: ChartData) -> ChartConfig {
    let points = data
        .values(0)
        .iter()
        .zip(data.values(1))
        .map(|(x, y)| (*x, *y))
        .collect::<Vec<_>>();

    ChartConfig::new(ChartKind::Scatter, "Distribution efficiency")
        .datasets(
            data.labels
                .iter()
                .zip(points)
                .enumerate()
                .map(|(index, (region, point))| {
                    Dataset::points(region.clone(), vec![point]).color(palette::cycle(index))
                }),
        )
        .labels(data.labels)
        .x_axis(AxisSpec::default().titled("Production (MW)"))
        .value_axis(AxisSpec::default().range(90.0, 100.0).titled("Efficiency (%)"))
        .tooltip(TooltipFormat::Point)
}

fn capacity_by_type(records: &[MetricRecord]) -> ChartData {
    let (labels, values): (Vec<_>, Vec<_>) = group_sum(records, "energy_type", "capacity_mw")
        .into_iter()
        .unzip();
    ChartData::new(labels).with_series("Installed capacity (MW)", values)
}

fn capacity_by_type_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    let colors = palette::SOURCES
        .iter()
        .copied()
        .take(data.labels.len().max(1))
        .collect();
    ChartConfig::new(ChartKind::PolarArea, "Installed capacity by type")
        .labels(data.labels)
        .dataset(Dataset::category("Installed capacity (MW)", values).colors(colors))
        .tooltip(TooltipFormat::Value {
            unit: Some(Unit::Megawatt),
            decimals: Some(0),
        })
}

fn monthly_summary(records: &[MetricRecord]) -> ChartData {
    ChartData::new(records.iter().map(period_label).collect())
        .with_series("Production (MW)", project(records, "production"))
        .with_series(
            "Capacity factor (%)",
            project(records, "capacity_factor")
                .into_iter()
                .map(|factor| factor * 100.0)
                .collect(),
        )
}

fn monthly_summary_chart(data: ChartData) -> ChartConfig {
    let production = data.values(0).to_vec();
    let factors = data.values(1).to_vec();
    ChartConfig::new(ChartKind::Line, "Monthly summary (3 years)")
        .labels(data.labels)
        .dataset(Dataset::category("Production (MW)", production).color(CYAN))
        .dataset(
            Dataset::category("Capacity factor (%)", factors)
                .color(GREEN)
                .on_secondary_axis(),
        )
        .value_axis(AxisSpec::unit(Unit::Megawatt))
        .secondary_axis(AxisSpec::unit(Unit::Percent))
}

fn distribution_analysis(records: &[MetricRecord]) -> ChartData {
    let top = top_n_by(records, "total_production", 8);
    ChartData::new(project_text(&top, "region"))
        .with_series("Total production (MW)", project(&top, "total_production"))
        .with_series("Estimated losses (MW)", project(&top, "estimated_losses"))
        .with_series("Net distribution (MW)", project(&top, "net_distribution"))
}

fn distribution_analysis_chart(data: ChartData) -> ChartConfig {
    let colors = [CYAN, RED, GREEN];
    ChartConfig::new(ChartKind::Bar, "Distribution analysis")
        .labels(data.labels)
        .datasets(
            data.series
                .into_iter()
                .zip(colors)
                .map(|(series, color)| Dataset::category(series.name, series.values).color(color)),
        )
        .value_axis(AxisSpec::unit(Unit::Megawatt))
}

fn region_capacity(records: &[MetricRecord]) -> ChartData {
    let top = top_n_by(records, "capacity", 10);
    ChartData::new(project_text(&top, "name"))
        .with_series("Capacity (GW)", project(&top, "capacity"))
}

fn region_capacity_chart(data: ChartData) -> ChartConfig {
    let values = data.values(0).to_vec();
    ChartConfig::new(ChartKind::Bar, "Installed capacity by region")
        .labels(data.labels)
        .dataset(Dataset::category("Capacity (GW)", values).color(palette::BLUE))
        .horizontal()
        .legend(LegendPosition::Hidden)
        .value_axis(AxisSpec::unit(Unit::Gigawatt).from_zero())
        .tooltip(TooltipFormat::value(Unit::Gigawatt))
}
