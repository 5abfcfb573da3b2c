use energy_dashboard::map::MapConfig;
use energy_dashboard::palette;
use energy_dashboard::Theme;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{panel_block, rgb};

const SIDEBAR_WIDTH: u16 = 36;

pub fn render_map(f: &mut Frame<'_>, area: Rect, map: Option<&MapConfig>, theme: Theme) {
    let Some(map) = map else {
        let paragraph = Paragraph::new("Map not initialised")
            .style(Style::default().fg(rgb(theme, palette::MUTED)))
            .block(panel_block("Installations", theme))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)])
        .split(area);

    render_canvas(f, chunks[0], map, theme);
    render_sidebar(f, chunks[1], map, theme);
}

fn render_canvas(f: &mut Frame<'_>, area: Rect, map: &MapConfig, theme: Theme) {
    let ([west, east], [south, north]) = map.view.bounds();
    let radius = map.view.span() / 80.0;
    let coastline = rgb(theme, palette::BORDER);

    let title = format!(
        "Installations ({:.2}, {:.2}) zoom {}",
        map.view.center.lat, map.view.center.lng, map.view.zoom
    );

    let canvas = Canvas::default()
        .block(panel_block(&title, theme))
        .marker(Marker::Braille)
        .x_bounds([west, east])
        .y_bounds([south, north])
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: coastline,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for marker in map.visible_markers() {
                let color = rgb(theme, marker.color);
                ctx.draw(&Circle {
                    x: marker.position.lng,
                    y: marker.position.lat,
                    radius,
                    color,
                });
                ctx.print(
                    marker.position.lng + radius,
                    marker.position.lat,
                    Line::styled(marker.label.clone(), Style::default().fg(color)),
                );
            }
        });

    f.render_widget(canvas, area);
}

/// Marker popups, dimmed when outside the current view.
fn render_sidebar(f: &mut Frame<'_>, area: Rect, map: &MapConfig, theme: Theme) {
    let mut lines = Vec::new();

    for marker in &map.markers {
        let visible = map.view.contains(marker.position);
        let mut style = Style::default().fg(rgb(theme, marker.color));
        if !visible {
            style = style.add_modifier(Modifier::DIM);
        }
        let mut popup = marker.popup.lines();
        if let Some(heading) = popup.next() {
            lines.push(Line::from(Span::styled(
                heading.to_string(),
                style.add_modifier(Modifier::BOLD),
            )));
        }
        for detail in popup {
            lines.push(Line::from(Span::styled(format!("  {detail}"), style)));
        }
        lines.push(Line::default());
    }

    let muted = Style::default().fg(rgb(theme, palette::MUTED));
    for control in &map.controls {
        lines.push(Line::from(Span::styled(format!("0  {}", control.label()), muted)));
    }
    lines.push(Line::from(Span::styled("hjkl/arrows pan, +/- zoom", muted)));
    lines.push(Line::from(Span::styled(map.basemap.attribution(), muted)));

    f.render_widget(
        Paragraph::new(lines).block(panel_block("Installations", theme)),
        area,
    );
}
