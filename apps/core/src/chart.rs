use serde::Serialize;

use crate::domain::{display_number, ChartKind, Unit};
use crate::palette::{self, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendPosition {
    Hidden,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stroke {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisSide {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DatasetValues {
    /// One value per chart label.
    Category(Vec<f64>),
    /// Free `(x, y)` points, used by scatter charts.
    Points(Vec<(f64, f64)>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub values: DatasetValues,
    pub colors: Vec<Rgb>,
    pub stroke: Stroke,
    pub fill: bool,
    pub axis: AxisSide,
}

impl Dataset {
    pub fn category(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self::with_values(label, DatasetValues::Category(values))
    }

    pub fn points(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self::with_values(label, DatasetValues::Points(points))
    }

    fn with_values(label: impl Into<String>, values: DatasetValues) -> Self {
        Self {
            label: label.into(),
            values,
            colors: Vec::new(),
            stroke: Stroke::Solid,
            fill: false,
            axis: AxisSide::Primary,
        }
    }

    #[must_use]
    pub fn color(mut self, color: Rgb) -> Self {
        self.colors = vec![color];
        self
    }

    /// One color per value; shorter lists repeat.
    #[must_use]
    pub fn colors(mut self, colors: Vec<Rgb>) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub const fn dashed(mut self) -> Self {
        self.stroke = Stroke::Dashed;
        self
    }

    #[must_use]
    pub const fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    #[must_use]
    pub const fn on_secondary_axis(mut self) -> Self {
        self.axis = AxisSide::Secondary;
        self
    }

    pub fn color_at(&self, index: usize) -> Rgb {
        if self.colors.is_empty() {
            palette::cycle(index)
        } else {
            self.colors[index % self.colors.len()]
        }
    }

    pub fn category_values(&self) -> &[f64] {
        match &self.values {
            DatasetValues::Category(values) => values,
            DatasetValues::Points(_) => &[],
        }
    }

    /// Every plotted value on the dataset's value axis.
    fn axis_values(&self) -> impl Iterator<Item = f64> + '_ {
        let (category, points): (&[f64], &[(f64, f64)]) = match &self.values {
            DatasetValues::Category(values) => (values.as_slice(), &[]),
            DatasetValues::Points(points) => (&[], points.as_slice()),
        };
        category
            .iter()
            .copied()
            .chain(points.iter().map(|(_, y)| *y))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    pub unit: Option<Unit>,
    pub decimals: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub begin_at_zero: bool,
    pub title: Option<String>,
}

impl AxisSpec {
    pub const fn unit(unit: Unit) -> Self {
        Self {
            unit: Some(unit),
            decimals: None,
            min: None,
            max: None,
            begin_at_zero: false,
            title: None,
        }
    }

    #[must_use]
    pub const fn from_zero(mut self) -> Self {
        self.begin_at_zero = true;
        self
    }

    #[must_use]
    pub const fn fixed(mut self, decimals: usize) -> Self {
        self.decimals = Some(decimals);
        self
    }

    #[must_use]
    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Tick label for `value`.
    pub fn tick(&self, value: f64) -> String {
        match (self.unit, self.decimals) {
            (Some(unit), Some(decimals)) => unit.format_fixed(value, decimals),
            (Some(unit), None) => unit.format(value),
            (None, Some(decimals)) => format!("{value:.decimals$}"),
            (None, None) => display_number(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "style")]
pub enum TooltipFormat {
    /// `12 MW`
    Value {
        unit: Option<Unit>,
        decimals: Option<usize>,
    },
    /// `Solar: 28%`
    LabelValue { unit: Unit },
    /// `1523 MW @ 95.0%`
    Point,
}

impl TooltipFormat {
    pub const fn value(unit: Unit) -> Self {
        Self::Value {
            unit: Some(unit),
            decimals: None,
        }
    }

    pub const fn plain() -> Self {
        Self::Value {
            unit: None,
            decimals: None,
        }
    }

    pub fn format(self, label: &str, value: f64) -> String {
        match self {
            Self::Value { unit, decimals } => AxisSpec {
                unit,
                decimals,
                ..AxisSpec::default()
            }
            .tick(value),
            Self::LabelValue { unit } => format!("{label}: {}", unit.format(value)),
            Self::Point => format!("{value}"),
        }
    }

    pub fn format_point(self, x: f64, y: f64) -> String {
        match self {
            Self::Point => format!(
                "{} @ {}",
                Unit::Megawatt.format_fixed(x, 0),
                Unit::Percent.format_fixed(y, 1)
            ),
            _ => format!("({}, {})", display_number(x), display_number(y)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
    pub value: f64,
    pub percent: f64,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub orientation: Orientation,
    pub legend: LegendPosition,
    pub value_axis: AxisSpec,
    pub x_axis: AxisSpec,
    pub secondary_axis: Option<AxisSpec>,
    pub tooltip: TooltipFormat,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            labels: Vec::new(),
            datasets: Vec::new(),
            orientation: Orientation::Vertical,
            legend: LegendPosition::Bottom,
            value_axis: AxisSpec::default(),
            x_axis: AxisSpec::default(),
            secondary_axis: None,
            tooltip: TooltipFormat::plain(),
        }
    }

    #[must_use]
    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    #[must_use]
    pub fn datasets(mut self, datasets: impl IntoIterator<Item = Dataset>) -> Self {
        self.datasets.extend(datasets);
        self
    }

    #[must_use]
    pub const fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    #[must_use]
    pub const fn legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn value_axis(mut self, axis: AxisSpec) -> Self {
        self.value_axis = axis;
        self
    }

    #[must_use]
    pub fn x_axis(mut self, axis: AxisSpec) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn secondary_axis(mut self, axis: AxisSpec) -> Self {
        self.secondary_axis = Some(axis);
        self
    }

    #[must_use]
    pub const fn tooltip(mut self, tooltip: TooltipFormat) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn axis(&self, side: AxisSide) -> &AxisSpec {
        match side {
            AxisSide::Secondary => self.secondary_axis.as_ref().unwrap_or(&self.value_axis),
            AxisSide::Primary => &self.value_axis,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.iter().all(|dataset| match &dataset.values {
            DatasetValues::Category(values) => values.is_empty(),
            DatasetValues::Points(points) => points.is_empty(),
        })
    }

    /// Value range for `side`, honoring fixed bounds and `begin_at_zero`.
    pub fn value_bounds(&self, side: AxisSide) -> (f64, f64) {
        let axis = self.axis(side);
        let values = self
            .datasets
            .iter()
            .filter(|dataset| dataset.axis == side || self.secondary_axis.is_none())
            .flat_map(Dataset::axis_values);
        let (low, high) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), v| {
            (low.min(v), high.max(v))
        });
        let (low, high) = if low.is_finite() {
            (low, high)
        } else {
            (0.0, 1.0)
        };

        let min = axis
            .min
            .unwrap_or(if axis.begin_at_zero { low.min(0.0) } else { low });
        let max = axis.max.unwrap_or(high);
        if max > min {
            (min, max)
        } else {
            (min, min + 1.0)
        }
    }

    /// Horizontal range for scatter points.
    pub fn x_bounds(&self) -> (f64, f64) {
        let (low, high) = self
            .datasets
            .iter()
            .filter_map(|dataset| match &dataset.values {
                DatasetValues::Points(points) => Some(points.iter().map(|(x, _)| *x)),
                DatasetValues::Category(_) => None,
            })
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), x| {
                (low.min(x), high.max(x))
            });
        let min = self.x_axis.min.unwrap_or(if low.is_finite() { low } else { 0.0 });
        let max = self.x_axis.max.unwrap_or(if high.is_finite() { high } else { 1.0 });
        if max > min {
            (min, max)
        } else {
            (min - 1.0, min + 1.0)
        }
    }

    /// Tooltip text for each point of a scatter dataset.
    pub fn point_labels(&self, dataset: &Dataset) -> Vec<String> {
        match &dataset.values {
            DatasetValues::Points(points) => points
                .iter()
                .map(|(x, y)| self.tooltip.format_point(*x, *y))
                .collect(),
            DatasetValues::Category(_) => Vec::new(),
        }
    }

    /// Text printed next to a plotted value: the tooltip when it carries a
    /// unit, otherwise the axis tick.
    pub fn value_label(&self, side: AxisSide, label: &str, value: f64) -> String {
        match self.tooltip {
            TooltipFormat::Value {
                unit: None,
                decimals: None,
            }
            | TooltipFormat::Point => self.axis(side).tick(value),
            TooltipFormat::LabelValue { unit } => unit.format(value),
            tooltip @ TooltipFormat::Value { .. } => tooltip.format(label, value),
        }
    }

    /// Per-label shares of the first dataset, for proportional charts and legends.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let Some(dataset) = self.datasets.first() else {
            return Vec::new();
        };
        let values = dataset.category_values();
        let total = values.iter().filter(|value| **value > 0.0).sum::<f64>();

        self.labels
            .iter()
            .zip(values)
            .enumerate()
            .map(|(index, (label, value))| LegendEntry {
                label: label.clone(),
                color: dataset.color_at(index),
                value: *value,
                percent: if total > 0.0 {
                    value.max(0.0) / total * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{CYAN, PINK};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bounds_start_at_zero_when_requested() {
        let config = ChartConfig::new(ChartKind::Bar, "t")
            .labels(vec!["a".into(), "b".into()])
            .dataset(Dataset::category("v", vec![40.0, 80.0]))
            .value_axis(AxisSpec::unit(Unit::Megawatt).from_zero());

        let (min, max) = config.value_bounds(AxisSide::Primary);
        assert!(close(min, 0.0));
        assert!(close(max, 80.0));
    }

    #[test]
    fn fixed_range_wins_over_data() {
        let config = ChartConfig::new(ChartKind::Scatter, "t")
            .dataset(Dataset::points("r", vec![(1200.0, 95.0)]))
            .value_axis(AxisSpec::default().range(90.0, 100.0));

        assert_eq!(config.value_bounds(AxisSide::Primary), (90.0, 100.0));
        assert_eq!(config.x_bounds(), (1199.0, 1201.0));
    }

    #[test]
    fn secondary_axis_only_sees_its_datasets() {
        let config = ChartConfig::new(ChartKind::Line, "t")
            .labels(vec!["2024-01".into()])
            .dataset(Dataset::category("production", vec![4200.0]))
            .dataset(Dataset::category("factor", vec![31.5]).on_secondary_axis())
            .value_axis(AxisSpec::unit(Unit::Megawatt))
            .secondary_axis(AxisSpec::unit(Unit::Percent));

        assert_eq!(config.value_bounds(AxisSide::Primary), (4200.0, 4201.0));
        assert_eq!(config.value_bounds(AxisSide::Secondary), (31.5, 32.5));
        assert_eq!(config.axis(AxisSide::Secondary).tick(31.5), "31.5%");
    }

    #[test]
    fn empty_chart_has_unit_bounds() {
        let config = ChartConfig::new(ChartKind::Line, "t").value_axis(AxisSpec::default());
        assert!(config.is_empty());
        assert_eq!(config.value_bounds(AxisSide::Primary), (0.0, 1.0));
    }

    #[test]
    fn legend_entries_share_the_total() {
        let config = ChartConfig::new(ChartKind::Doughnut, "mix")
            .labels(vec!["Solar".into(), "Wind".into()])
            .dataset(Dataset::category("share", vec![25.0, 75.0]).colors(vec![CYAN, PINK]));

        let entries = config.legend_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].color, PINK);
        assert!(close(entries[0].percent, 25.0));
        assert!(close(entries[1].percent, 75.0));
    }

    #[test]
    fn tooltips_format_like_the_dashboard() {
        assert_eq!(TooltipFormat::value(Unit::Megawatt).format("", 342.0), "342 MW");
        assert_eq!(
            TooltipFormat::LabelValue { unit: Unit::Percent }.format("Wind", 36.0),
            "Wind: 36%"
        );
        assert_eq!(
            TooltipFormat::Value {
                unit: Some(Unit::Percent),
                decimals: Some(1)
            }
            .format("", 13.84),
            "13.8%"
        );
        assert_eq!(TooltipFormat::Point.format_point(1523.4, 95.0), "1523 MW @ 95.0%");
    }

    #[test]
    fn scatter_points_use_the_point_tooltip() {
        let config = ChartConfig::new(ChartKind::Scatter, "efficiency")
            .dataset(Dataset::points("Bretagne", vec![(1500.0, 95.0), (980.4, 92.26)]))
            .tooltip(TooltipFormat::Point);
        assert_eq!(
            config.point_labels(&config.datasets[0]),
            vec!["1500 MW @ 95.0%", "980 MW @ 92.3%"]
        );
        assert!(config
            .point_labels(&Dataset::category("bars", vec![1.0]))
            .is_empty());
    }

    #[test]
    fn value_labels_prefer_tooltip_units() {
        let growth = ChartConfig::new(ChartKind::Bar, "growth")
            .value_axis(AxisSpec::unit(Unit::Percent).fixed(0))
            .tooltip(TooltipFormat::Value {
                unit: Some(Unit::Percent),
                decimals: Some(1),
            });
        assert_eq!(growth.value_label(AxisSide::Primary, "2019", 13.8), "13.8%");

        let plain = ChartConfig::new(ChartKind::Line, "trend")
            .value_axis(AxisSpec::unit(Unit::Megawatt));
        assert_eq!(plain.value_label(AxisSide::Primary, "", 4210.5), "4210.5 MW");

        let mix = ChartConfig::new(ChartKind::Doughnut, "mix")
            .tooltip(TooltipFormat::LabelValue { unit: Unit::Megawatt });
        assert_eq!(mix.value_label(AxisSide::Primary, "Solar", 120.0), "120 MW");
    }

    #[test]
    fn dataset_colors_repeat() {
        let dataset = Dataset::category("v", vec![1.0, 2.0, 3.0]).colors(vec![CYAN, PINK]);
        assert_eq!(dataset.color_at(2), CYAN);
        assert_eq!(Dataset::category("v", vec![]).color_at(1), PINK);
    }
}
