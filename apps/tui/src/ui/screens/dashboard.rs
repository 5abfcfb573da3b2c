use energy_dashboard::map::MAP_TARGET;
use energy_dashboard::notify::Visibility;
use energy_dashboard::palette::{self, Rgb};
use energy_dashboard::{Page, Theme};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::state::Banner;
use crate::app::App;
use crate::ui::widgets::charts::render_chart_slot;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::popup::top_right_rect;
use crate::ui::widgets::{rgb, truncate};

const BANNER_WIDTH: u16 = 44;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let theme = app.dashboard.theme();
    f.render_widget(
        Block::default().style(Style::default().bg(rgb(theme, palette::BACKGROUND))),
        f.area(),
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and page tabs
            Constraint::Length(5), // KPI strip
            Constraint::Min(8),    // Page content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_header(app, f, layout[0]);
    render_kpis(app, f, layout[1]);
    render_page(app, f, layout[2]);
    render_status(app, f, layout[3]);
    render_shortcuts(theme, f, layout[4]);

    if let Some(banner) = &app.banner {
        render_banner(banner, theme, f);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let theme = app.dashboard.theme();
    let block = Block::default()
        .title(" ⚡ Energy Dashboard ")
        .title_style(
            Style::default()
                .fg(rgb(theme, palette::CYAN))
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(rgb(theme, palette::BORDER)));

    let titles = Page::ALL
        .iter()
        .map(|page| Line::from(format!("{} {}", page.index() + 1, page.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.dashboard.page().index())
        .style(Style::default().fg(rgb(theme, palette::MUTED)))
        .highlight_style(
            Style::default()
                .fg(rgb(theme, palette::CYAN))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_kpis(app: &App, f: &mut Frame<'_>, area: Rect) {
    let theme = app.dashboard.theme();
    let kpis = app.dashboard.kpis();
    let cards = kpis.cards();
    if cards.is_empty() {
        return;
    }

    let count = u32::try_from(cards.len()).unwrap_or(1);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (index, (card, chunk)) in cards.iter().zip(chunks.iter()).enumerate() {
        let accent = rgb(theme, card.accent);
        let focused = kpis.focused() == Some(index);

        let mut block = Block::default()
            .title(format!(" {} ", card.title))
            .title_style(Style::default().fg(rgb(theme, palette::MUTED)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(rgb(theme, palette::BORDER)));
        if focused {
            block = block
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
        }

        let lines = vec![
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
            Paragraph::new(lines).block(block).alignment(Alignment::Center),
            *chunk,
        );
    }
}

fn render_page(app: &App, f: &mut Frame<'_>, area: Rect) {
    let theme = app.dashboard.theme();
    let page = app.dashboard.page();

    if page == Page::Map {
        app.with_board(|board| render_map(f, area, board.map(MAP_TARGET), theme));
        return;
    }

    let targets = page.targets();
    let rows = targets.len().div_ceil(2);
    let row_count = u32::try_from(rows.max(1)).unwrap_or(1);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..rows).map(|_| Constraint::Ratio(1, row_count)))
        .split(area);

    let loading = app.is_loading();
    app.with_board(|board| {
        for (row, pair) in targets.chunks(2).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(row_areas[row]);
            // An odd last chart spans the whole row.
            let spans_row = pair.len() == 1;
            for (column, target) in pair.iter().enumerate() {
                let cell = if spans_row { row_areas[row] } else { cells[column] };
                render_chart_slot(f, cell, target, board.chart(target), theme, loading);
            }
        }
    });
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let theme = app.dashboard.theme();
    let status = if app.status_message.is_empty() {
        format!("API {}", app.api_base)
    } else {
        format!("{}  ·  API {}", app.status_message, app.api_base)
    };
    let color = if app.last_report.as_ref().is_some_and(|report| !report.failed.is_empty()) {
        palette::ORANGE
    } else {
        palette::GREEN
    };
    f.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(rgb(theme, color)))),
        area,
    );
}

fn render_shortcuts(theme: Theme, f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(rgb(theme, palette::YELLOW))
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(rgb(theme, palette::MUTED));

    let mut spans = Vec::new();
    for (keys, action) in [
        ("←/→", "pages"),
        ("Tab", "KPIs"),
        ("r", "refresh"),
        ("Ctrl+P", "export"),
        ("Ctrl+D", "theme"),
        ("?", "help"),
        ("q", "quit"),
    ] {
        spans.push(Span::styled(keys, key));
        spans.push(Span::styled(format!(" {action}  "), text));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Blends `color` toward `background` as `opacity` falls to zero.
fn faded(color: Rgb, background: Rgb, opacity: f64) -> Rgb {
    let mix = |fg: u8, bg: u8| {
        let value = f64::from(bg) + (f64::from(fg) - f64::from(bg)) * opacity.clamp(0.0, 1.0);
        value.round() as u8
    };
    Rgb(
        mix(color.0, background.0),
        mix(color.1, background.1),
        mix(color.2, background.2),
    )
}

fn render_banner(banner: &Banner, theme: Theme, f: &mut Frame<'_>) {
    let opacity = match banner.visibility {
        Visibility::Visible => 1.0,
        Visibility::Fading(opacity) => opacity,
        Visibility::Dismissed => return,
    };

    let accent = rgb(theme, faded(banner.kind.color(), palette::PANEL, opacity));
    let foreground = rgb(theme, faded(palette::WHITE, palette::PANEL, opacity));

    let area = top_right_rect(BANNER_WIDTH, 3, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(rgb(theme, palette::PANEL)));
    let message = truncate(&banner.message, usize::from(BANNER_WIDTH.saturating_sub(4)));
    f.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(foreground)))
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}
