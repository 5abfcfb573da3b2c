use energy_dashboard::chart::{AxisSide, DatasetValues, LegendPosition, Orientation, Stroke};
use energy_dashboard::map::{MapConfig, MAP_TARGET};
use energy_dashboard::notify::{NotificationKind, Visibility};
use energy_dashboard::palette::{self, Rgb};
use energy_dashboard::shortcuts::Shortcut;
use energy_dashboard::{Board, ChartConfig, ChartKind, Dashboard, LoadReport, Page, Theme};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Clear, Dataset, GraphType,
        LegendPosition as ChartLegendPosition, Paragraph, Row, Table, Tabs,
    },
    Frame,
};

pub struct Banner {
    pub message: String,
    pub kind: NotificationKind,
    pub visibility: Visibility,
}

/// Everything one frame needs, borrowed from the shared page state.
pub struct View<'a> {
    pub dashboard: &'a Dashboard,
    pub board: &'a Board,
    pub banner: Option<&'a Banner>,
    pub report: Option<&'a LoadReport>,
    pub show_help: bool,
    pub api_base: &'a str,
}

/// Scatter point list beside the plot.
const POINT_LIST_WIDTH: u16 = 34;

const fn rgb(theme: Theme, color: Rgb) -> Color {
    let Rgb(r, g, b) = theme.apply(color);
    Color::Rgb(r, g, b)
}

fn panel(title: &str, theme: Theme) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(rgb(theme, palette::WHITE))
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(rgb(theme, palette::BORDER)))
}

pub fn render_dashboard(f: &mut Frame<'_>, view: &View<'_>) {
    let theme = view.dashboard.theme();
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(rgb(theme, palette::BACKGROUND))),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(f, layout[0], view);
    render_kpis(f, layout[1], view);

    if view.dashboard.page() == Page::Map {
        render_map(f, layout[2], view.board.map(MAP_TARGET), theme);
    } else {
        render_charts(f, layout[2], view);
    }

    render_footer(f, layout[3], view);

    if let Some(banner) = view.banner {
        render_banner(f, area, banner, theme);
    }
    if view.show_help {
        render_help(f, area, theme);
    }
}

fn render_tabs(f: &mut Frame<'_>, area: Rect, view: &View<'_>) {
    let theme = view.dashboard.theme();
    let titles = Page::ALL
        .iter()
        .map(|page| Line::from(format!("{} {}", page.index() + 1, page.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(panel("⚡ Energy Dashboard", theme))
        .select(view.dashboard.page().index())
        .style(Style::default().fg(rgb(theme, palette::MUTED)))
        .highlight_style(
            Style::default()
                .fg(rgb(theme, palette::CYAN))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_kpis(f: &mut Frame<'_>, area: Rect, view: &View<'_>) {
    let theme = view.dashboard.theme();
    let kpis = view.dashboard.kpis();
    let count = u32::try_from(kpis.cards().len().max(1)).unwrap_or(1);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(kpis.cards().iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (index, (card, chunk)) in kpis.cards().iter().zip(chunks.iter()).enumerate() {
        let accent = rgb(theme, card.accent);
        let border = if kpis.focused() == Some(index) {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(rgb(theme, palette::BORDER))
        };
        let block = Block::default()
            .title(card.title)
            .borders(Borders::ALL)
            .border_style(border);
        let text = vec![
            Line::from(Span::styled(
                kpis.display(index),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.detail,
                Style::default().fg(rgb(theme, palette::MUTED)),
            )),
        ];
        f.render_widget(
            Paragraph::new(text).block(block).alignment(Alignment::Center),
            *chunk,
        );
    }
}

fn render_charts(f: &mut Frame<'_>, area: Rect, view: &View<'_>) {
    let theme = view.dashboard.theme();
    let targets = view.dashboard.page().targets();
    let columns = 3;
    let rows = targets.len().div_ceil(columns);
    let row_count = u32::try_from(rows.max(1)).unwrap_or(1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..rows).map(|_| Constraint::Ratio(1, row_count)))
        .split(area);

    for (row, chunk) in targets.chunks(columns).enumerate() {
        let cell_count = u32::try_from(chunk.len()).unwrap_or(1);
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(chunk.iter().map(|_| Constraint::Ratio(1, cell_count)))
            .split(row_areas[row]);

        for (target, cell) in chunk.iter().zip(cells.iter()) {
            match view.board.chart(target) {
                Some(config) if !config.is_empty() => render_chart(f, *cell, config, theme),
                Some(config) => placeholder(f, *cell, &config.title, "No data available", theme),
                None if view.report.is_none() => placeholder(f, *cell, target, "Loading...", theme),
                None => placeholder(f, *cell, target, "No data available", theme),
            }
        }
    }
}

fn placeholder(f: &mut Frame<'_>, area: Rect, title: &str, message: &str, theme: Theme) {
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(rgb(theme, palette::MUTED)))
            .alignment(Alignment::Center)
            .block(panel(title, theme)),
        area,
    );
}

fn render_chart(f: &mut Frame<'_>, area: Rect, config: &ChartConfig, theme: Theme) {
    let block = panel(&config.title, theme);
    match config.kind {
        ChartKind::Bar => render_bars(f, area, config, block, theme),
        ChartKind::Line | ChartKind::Radar | ChartKind::Scatter => {
            render_plot(f, area, config, block, theme);
        }
        ChartKind::Doughnut | ChartKind::PolarArea => render_shares(f, area, config, block, theme),
    }
}

/// Secondary-axis values rescaled into the primary range.
fn on_primary(config: &ChartConfig, side: AxisSide, value: f64) -> f64 {
    if side == AxisSide::Primary || config.secondary_axis.is_none() {
        return value;
    }
    let (low, high) = config.value_bounds(AxisSide::Primary);
    let (s_low, s_high) = config.value_bounds(AxisSide::Secondary);
    low + (value - s_low) / (s_high - s_low) * (high - low)
}

fn render_bars(f: &mut Frame<'_>, area: Rect, config: &ChartConfig, block: Block<'_>, theme: Theme) {
    let (_, max) = config.value_bounds(AxisSide::Primary);
    let mut chart = BarChart::default()
        .block(block)
        .max((max.max(0.0) * 100.0).round() as u64)
        .bar_gap(0)
        .group_gap(1);

    if config.orientation == Orientation::Horizontal {
        chart = chart.direction(Direction::Horizontal).bar_width(1);
    } else {
        chart = chart.bar_width(3);
    }

    for (index, label) in config.labels.iter().enumerate() {
        let bars = config
            .datasets
            .iter()
            .map(|dataset| {
                let value = dataset.category_values().get(index).copied().unwrap_or(0.0);
                Bar::default()
                    .value((on_primary(config, dataset.axis, value).max(0.0) * 100.0).round() as u64)
                    .text_value(config.value_label(dataset.axis, label, value))
                    .style(Style::default().fg(rgb(theme, dataset.color_at(index))))
            })
            .collect::<Vec<_>>();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(label.clone()))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}

fn render_plot(f: &mut Frame<'_>, area: Rect, config: &ChartConfig, block: Block<'_>, theme: Theme) {
    let scatter = config.kind == ChartKind::Scatter;
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (plot_area, list_area) = if scatter && inner.width >= POINT_LIST_WIDTH * 2 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(16), Constraint::Length(POINT_LIST_WIDTH)])
            .split(inner);
        (chunks[0], Some(chunks[1]))
    } else {
        (inner, None)
    };

    let series = config
        .datasets
        .iter()
        .map(|dataset| match &dataset.values {
            DatasetValues::Category(values) => values
                .iter()
                .enumerate()
                .map(|(index, value)| (index as f64, on_primary(config, dataset.axis, *value)))
                .collect::<Vec<_>>(),
            DatasetValues::Points(points) => points.clone(),
        })
        .collect::<Vec<_>>();

    let datasets = config
        .datasets
        .iter()
        .zip(&series)
        .map(|(dataset, data)| {
            Dataset::default()
                .name(dataset.label.clone())
                .marker(plot_marker(scatter, dataset.stroke))
                .graph_type(if scatter {
                    GraphType::Scatter
                } else {
                    GraphType::Line
                })
                .style(plot_style(dataset, theme))
                .data(data)
        })
        .collect::<Vec<_>>();

    let (x_low, x_high) = if scatter {
        config.x_bounds()
    } else {
        (0.0, config.labels.len().saturating_sub(1).max(1) as f64)
    };
    let x_labels = if scatter {
        vec![config.x_axis.tick(x_low), config.x_axis.tick(x_high)]
    } else {
        [config.labels.first(), config.labels.last()]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    };

    let (low, high) = config.value_bounds(AxisSide::Primary);
    let axis = config.axis(AxisSide::Primary);
    let muted = Style::default().fg(rgb(theme, palette::MUTED));

    let chart = Chart::new(datasets)
        .x_axis(Axis::default().style(muted).bounds([x_low, x_high]).labels(x_labels))
        .y_axis(
            Axis::default()
                .style(muted)
                .bounds([low, high])
                .labels([axis.tick(low), axis.tick(high)]),
        )
        .legend_position(match (config.legend, list_area) {
            (LegendPosition::Hidden, _) | (_, Some(_)) => None,
            (LegendPosition::Top, None) => Some(ChartLegendPosition::TopRight),
            (LegendPosition::Bottom, None) => Some(ChartLegendPosition::BottomRight),
        });
    f.render_widget(chart, plot_area);

    if let Some(list_area) = list_area {
        f.render_widget(Paragraph::new(point_lines(config, theme)), list_area);
    }
}

/// Dashed series are drawn as dots; scatter points always are.
const fn plot_marker(scatter: bool, stroke: Stroke) -> Marker {
    match (scatter, stroke) {
        (true, _) | (false, Stroke::Dashed) => Marker::Dot,
        (false, Stroke::Solid) => Marker::Braille,
    }
}

fn plot_style(dataset: &energy_dashboard::Dataset, theme: Theme) -> Style {
    let style = Style::default().fg(rgb(theme, dataset.color_at(0)));
    if dataset.fill {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Each scatter point as `● region  1500 MW @ 95.0%`.
fn point_lines(config: &ChartConfig, theme: Theme) -> Vec<Line<'static>> {
    config
        .datasets
        .iter()
        .flat_map(|dataset| {
            let color = Style::default().fg(rgb(theme, dataset.color_at(0)));
            let name = dataset.label.clone();
            config.point_labels(dataset).into_iter().map(move |tooltip| {
                Line::from(vec![
                    Span::styled("● ", color),
                    Span::styled(format!("{name} "), Style::default().fg(rgb(theme, palette::WHITE))),
                    Span::styled(tooltip, Style::default().fg(rgb(theme, palette::MUTED))),
                ])
            })
        })
        .collect()
}

fn render_shares(f: &mut Frame<'_>, area: Rect, config: &ChartConfig, block: Block<'_>, theme: Theme) {
    let lines = config
        .legend_entries()
        .into_iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("● ", Style::default().fg(rgb(theme, entry.color))),
                Span::styled(entry.label.clone(), Style::default().fg(rgb(theme, palette::WHITE))),
                Span::styled(
                    format!(
                        "  {} ({:.1}%)",
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

/// The installations as a table; rows outside the current view are dimmed.
fn render_map(f: &mut Frame<'_>, area: Rect, map: Option<&MapConfig>, theme: Theme) {
    let Some(map) = map else {
        placeholder(f, area, "Installations", "Map not initialised", theme);
        return;
    };

    let rows = map.markers.iter().map(|marker| {
        let mut style = Style::default().fg(rgb(theme, marker.color));
        if !map.view.contains(marker.position) {
            style = style.add_modifier(Modifier::DIM);
        }
        let details = marker.popup.lines().skip(1).collect::<Vec<_>>().join("  ");
        Row::new(vec![
            Cell::from(marker.label.clone()),
            Cell::from(format!("{:.2}, {:.2}", marker.position.lat, marker.position.lng)),
            Cell::from(details),
        ])
        .style(style)
    });

    let title = format!(
        "Installations around ({:.2}, {:.2}), zoom {} | {}",
        map.view.center.lat,
        map.view.center.lng,
        map.view.zoom,
        map.basemap.attribution()
    );
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(50),
        ],
    )
    .header(
        Row::new(vec!["Name", "Position", "Details"])
            .style(Style::default().fg(rgb(theme, palette::MUTED))),
    )
    .block(panel(&title, theme));

    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame<'_>, area: Rect, view: &View<'_>) {
    let theme = view.dashboard.theme();
    let status = match view.report {
        None => "Loading charts...".to_string(),
        Some(report) if report.failed.is_empty() => format!("{} charts loaded", report.rendered),
        Some(report) => format!(
            "{} charts loaded, {} failed (see console)",
            report.rendered,
            report.failed.len()
        ),
    };
    let hints = Shortcut::ALL
        .iter()
        .map(|shortcut| format!("{} {}", shortcut.keys(), shortcut.description()))
        .collect::<Vec<_>>()
        .join(" · ");
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(status, Style::default().fg(rgb(theme, palette::GREEN))),
            Span::styled(
                format!("  ·  API {}  ·  ←/→ pages · Tab KPIs · r refresh · {hints} · ? help", view.api_base),
                Style::default().fg(rgb(theme, palette::MUTED)),
            ),
        ])),
        area,
    );
}

fn render_banner(f: &mut Frame<'_>, area: Rect, banner: &Banner, theme: Theme) {
    let modifier = match banner.visibility {
        Visibility::Visible => Modifier::BOLD,
        Visibility::Fading(_) => Modifier::DIM,
        Visibility::Dismissed => return,
    };
    let width = 44.min(area.width);
    let banner_area = Rect {
        x: area.x + area.width - width,
        y: area.y + 1,
        width,
        height: 3.min(area.height),
    };
    f.render_widget(Clear, banner_area);
    f.render_widget(
        Paragraph::new(banner.message.as_str())
            .style(Style::default().fg(rgb(theme, palette::WHITE)).add_modifier(modifier))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(rgb(theme, banner.kind.color())))
                    .style(Style::default().bg(rgb(theme, palette::PANEL))),
            ),
        banner_area,
    );
}

fn render_help(f: &mut Frame<'_>, area: Rect, theme: Theme) {
    let width = 52.min(area.width);
    let height = 16.min(area.height);
    let help_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let mut lines = vec![
        Line::from("←/→ or 1-5   switch page"),
        Line::from("Tab          focus KPI (Shift+Tab back)"),
        Line::from("r            refresh charts"),
        Line::from("h j k l      pan map, + / - zoom, 0 reset"),
    ];
    lines.extend(
        Shortcut::ALL
            .iter()
            .map(|shortcut| Line::from(format!("{:<13}{}", shortcut.keys(), shortcut.description()))),
    );
    lines.push(Line::from("? / Esc      close help"));

    f.render_widget(Clear, help_area);
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(rgb(theme, palette::WHITE)))
            .block(
                Block::default()
                    .title(" Keyboard shortcuts ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(rgb(theme, palette::YELLOW)))
                    .style(Style::default().bg(rgb(theme, palette::PANEL))),
            ),
        help_area,
    );
}
