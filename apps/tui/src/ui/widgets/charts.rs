use energy_dashboard::chart::{AxisSide, DatasetValues, LegendPosition, Orientation, Stroke};
use energy_dashboard::palette;
use energy_dashboard::{ChartConfig, ChartKind, Dataset, Theme};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset as ChartDataset, GraphType,
    LegendPosition as ChartLegendPosition, Paragraph,
};
use ratatui::Frame;

use super::{panel_block, rgb, truncate};

/// Bar heights are integers; values are scaled to keep two decimals.
const BAR_SCALE: f64 = 100.0;
const LABEL_WIDTH: usize = 16;
/// Scatter point list: swatch, region name and `1500 MW @ 95.0%`.
const POINT_LIST_WIDTH: u16 = 32;
const POINT_TEXT_WIDTH: usize = 16;

/// Draws whatever sits in a chart slot: the chart, or a placeholder.
pub fn render_chart_slot(
    f: &mut Frame<'_>,
    area: Rect,
    target: &str,
    config: Option<&ChartConfig>,
    theme: Theme,
    loading: bool,
) {
    let Some(config) = config else {
        let message = if loading {
            "Loading..."
        } else {
            "No data available"
        };
        render_placeholder(f, area, panel_block(target, theme), message, theme);
        return;
    };

    let block = panel_block(&config.title, theme);
    if config.is_empty() {
        render_placeholder(f, area, block, "No data available", theme);
        return;
    }

    match config.kind {
        ChartKind::Bar => render_bars(f, area, config, block, theme),
        ChartKind::Line | ChartKind::Radar => render_lines(f, area, config, block, theme),
        ChartKind::Scatter => render_scatter(f, area, config, block, theme),
        ChartKind::Doughnut | ChartKind::PolarArea => render_shares(f, area, config, block, theme),
    }
}

fn render_placeholder(f: &mut Frame<'_>, area: Rect, block: Block<'_>, message: &str, theme: Theme) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(rgb(theme, palette::MUTED)))
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Maps a secondary-axis value onto the primary bounds so both share one plot.
fn plotted(config: &ChartConfig, dataset: &Dataset, value: f64) -> f64 {
    if dataset.axis == AxisSide::Primary || config.secondary_axis.is_none() {
        return value;
    }
    let (primary_low, primary_high) = config.value_bounds(AxisSide::Primary);
    let (low, high) = config.value_bounds(AxisSide::Secondary);
    primary_low + (value - low) / (high - low) * (primary_high - primary_low)
}

/// Dataset name for the legend; secondary datasets carry their own range.
fn legend_name(config: &ChartConfig, dataset: &Dataset) -> String {
    if dataset.axis == AxisSide::Secondary && config.secondary_axis.is_some() {
        let (low, high) = config.value_bounds(AxisSide::Secondary);
        let axis = config.axis(AxisSide::Secondary);
        format!("{} [{}..{}]", dataset.label, axis.tick(low), axis.tick(high))
    } else {
        dataset.label.clone()
    }
}

fn render_bars(f: &mut Frame<'_>, area: Rect, config: &ChartConfig, block: Block<'_>, theme: Theme) {
    let horizontal = config.orientation == Orientation::Horizontal;
    let (_, max) = config.value_bounds(AxisSide::Primary);

    let groups = config
        .labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let bars = config
                .datasets
                .iter()
                .map(|dataset| {
                    let value = dataset.category_values().get(index).copied().unwrap_or(0.0);
                    let height = (plotted(config, dataset, value).max(0.0) * BAR_SCALE).round();
                    Bar::default()
                        .value(height as u64)
                        .text_value(config.value_label(dataset.axis, label, value))
                        .style(Style::default().fg(rgb(theme, dataset.color_at(index))))
                        .value_style(
                            Style::default()
                                .fg(rgb(theme, palette::BACKGROUND))
                                .bg(rgb(theme, dataset.color_at(index))),
                        )
                })
                .collect::<Vec<_>>();
            BarGroup::default()
                .label(Line::from(truncate(label, LABEL_WIDTH)))
                .bars(&bars)
        })
        .collect::<Vec<_>>();

    let mut chart = BarChart::default()
        .block(block)
        .max((max.max(0.0) * BAR_SCALE).round() as u64)
        .bar_gap(0)
        .group_gap(1)
        .label_style(Style::default().fg(rgb(theme, palette::MUTED)));

    let per_group = u16::try_from(config.datasets.len().max(1)).unwrap_or(u16::MAX);
    if horizontal {
        chart = chart.direction(Direction::Horizontal).bar_width(1);
    } else {
        let groups_len = u16::try_from(config.labels.len().max(1)).unwrap_or(u16::MAX);
        let inner = area.width.saturating_sub(2);
        let usable = inner.saturating_sub(groups_len.saturating_sub(1));
        let width = (usable / groups_len.saturating_mul(per_group)).clamp(1, 9);
        chart = chart.bar_width(width);
    }

    for group in groups {
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

fn legend_position(config: &ChartConfig) -> Option<ChartLegendPosition> {
    match config.legend {
        LegendPosition::Hidden => None,
        LegendPosition::Top => Some(ChartLegendPosition::TopRight),
        LegendPosition::Bottom => Some(ChartLegendPosition::BottomRight),
    }
}

fn value_axis<'a>(config: &ChartConfig, theme: Theme) -> Axis<'a> {
    let axis = config.axis(AxisSide::Primary);
    let (low, high) = config.value_bounds(AxisSide::Primary);
    let mut value_axis = Axis::default()
        .style(Style::default().fg(rgb(theme, palette::MUTED)))
        .bounds([low, high])
        .labels([
            axis.tick(low),
            axis.tick((low + high) / 2.0),
            axis.tick(high),
        ]);
    if let Some(title) = &axis.title {
        value_axis = value_axis.title(title.clone());
    }
    value_axis
}

/// First, middle and last category labels.
fn category_ticks(labels: &[String]) -> Vec<String> {
    match labels {
        [] => Vec::new(),
        [only] => vec![only.clone()],
        [first, last] => vec![first.clone(), last.clone()],
        [first, .., last] => vec![
            first.clone(),
            labels[labels.len() / 2].clone(),
            last.clone(),
        ],
    }
}

fn render_lines(f: &mut Frame<'_>, area: Rect, config: &ChartConfig, block: Block<'_>, theme: Theme) {
    let series = config
        .datasets
        .iter()
        .map(|dataset| match &dataset.values {
            DatasetValues::Category(values) => values
                .iter()
                .enumerate()
                .map(|(index, value)| (index as f64, plotted(config, dataset, *value)))
                .collect::<Vec<_>>(),
            DatasetValues::Points(points) => points.clone(),
        })
        .collect::<Vec<_>>();

    let datasets = config
        .datasets
        .iter()
        .zip(&series)
        .map(|(dataset, data)| {
            let marker = match dataset.stroke {
                Stroke::Dashed => Marker::Dot,
                Stroke::Solid => Marker::Braille,
            };
            let mut style = Style::default().fg(rgb(theme, dataset.color_at(0)));
            if dataset.fill {
                style = style.add_modifier(Modifier::BOLD);
            }
            ChartDataset::default()
                .name(legend_name(config, dataset))
                .marker(marker)
                .graph_type(GraphType::Line)
                .style(style)
                .data(data)
        })
        .collect::<Vec<_>>();

    let last = config.labels.len().saturating_sub(1).max(1) as f64;
    let x_axis = Axis::default()
        .style(Style::default().fg(rgb(theme, palette::MUTED)))
        .bounds([0.0, last])
        .labels(
            category_ticks(&config.labels)
                .into_iter()
                .map(|label| Span::raw(truncate(&label, LABEL_WIDTH))),
        );

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(value_axis(config, theme))
        .legend_position(legend_position(config));

    f.render_widget(chart, area);
}

fn render_scatter(f: &mut Frame<'_>, area: Rect, config: &ChartConfig, block: Block<'_>, theme: Theme) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    // The point list doubles as the legend when there is room for it.
    let (plot_area, list_area) = if inner.width >= POINT_LIST_WIDTH * 2 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(POINT_LIST_WIDTH)])
            .split(inner);
        (chunks[0], Some(chunks[1]))
    } else {
        (inner, None)
    };

    let series = config
        .datasets
        .iter()
        .map(|dataset| match &dataset.values {
            DatasetValues::Points(points) => points.clone(),
            DatasetValues::Category(values) => values
                .iter()
                .enumerate()
                .map(|(index, value)| (index as f64, *value))
                .collect(),
        })
        .collect::<Vec<_>>();

    let datasets = config
        .datasets
        .iter()
        .zip(&series)
        .map(|(dataset, data)| {
            ChartDataset::default()
                .name(dataset.label.clone())
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(rgb(theme, dataset.color_at(0))))
                .data(data)
        })
        .collect::<Vec<_>>();

    let (west, east) = config.x_bounds();
    let mut x_axis = Axis::default()
        .style(Style::default().fg(rgb(theme, palette::MUTED)))
        .bounds([west, east])
        .labels([
            config.x_axis.tick(west),
            config.x_axis.tick((west + east) / 2.0),
            config.x_axis.tick(east),
        ]);
    if let Some(title) = &config.x_axis.title {
        x_axis = x_axis.title(title.clone());
    }

    let chart = Chart::new(datasets)
        .x_axis(x_axis)
        .y_axis(value_axis(config, theme))
        .legend_position(if list_area.is_some() {
            None
        } else {
            legend_position(config)
        });
    f.render_widget(chart, plot_area);

    if let Some(list_area) = list_area {
        f.render_widget(Paragraph::new(point_lines(config, theme)), list_area);
    }
}

/// One line per scatter point: dataset name and its tooltip text.
fn point_lines(config: &ChartConfig, theme: Theme) -> Vec<Line<'static>> {
    let name_width = usize::from(POINT_LIST_WIDTH) - POINT_TEXT_WIDTH - 3;
    config
        .datasets
        .iter()
        .flat_map(|dataset| {
            let color = Style::default().fg(rgb(theme, dataset.color_at(0)));
            let name = truncate(&dataset.label, name_width);
            config.point_labels(dataset).into_iter().map(move |tooltip| {
                Line::from(vec![
                    Span::styled("● ", color),
                    Span::styled(
                        format!("{name:<name_width$} "),
                        Style::default().fg(rgb(theme, palette::WHITE)),
                    ),
                    Span::styled(tooltip, Style::default().fg(rgb(theme, palette::MUTED))),
                ])
            })
        })
        .collect()
}

/// Doughnut and polar-area charts as a legend with proportional bars.
fn render_shares(f: &mut Frame<'_>, area: Rect, config: &ChartConfig, block: Block<'_>, theme: Theme) {
    let entries = config.legend_entries();
    let label_width = entries
        .iter()
        .map(|entry| entry.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(LABEL_WIDTH);
    let largest = entries
        .iter()
        .map(|entry| entry.value)
        .fold(0.0_f64, f64::max);

    // Room left for the bar after the swatch, the label and the value text.
    let bar_space = usize::from(area.width.saturating_sub(2)).saturating_sub(label_width + 22);

    let lines = entries
        .iter()
        .map(|entry| {
            let fraction = if config.kind == ChartKind::PolarArea && largest > 0.0 {
                entry.value.max(0.0) / largest
            } else {
                entry.percent / 100.0
            };
            let bar_len = (fraction * bar_space as f64).round() as usize;
            let color = Style::default().fg(rgb(theme, entry.color));
            Line::from(vec![
                Span::styled("■ ", color),
                Span::styled(
                    format!("{:<label_width$} ", truncate(&entry.label, label_width)),
                    Style::default().fg(rgb(theme, palette::WHITE)),
                ),
                Span::styled("█".repeat(bar_len), color),
                Span::styled(
                    format!(
                        " {} ({:.1}%)",
                        config.value_label(AxisSide::Primary, &entry.label, entry.value),
                        entry.percent
                    ),
                    Style::default().fg(rgb(theme, palette::MUTED)),
                ),
            ])
        })
        .collect::<Vec<_>>();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
