use energy_dashboard::palette;
use energy_dashboard::shortcuts::Shortcut;
use energy_dashboard::Theme;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::ui::widgets::popup::centered_rect;
use crate::ui::widgets::rgb;

pub fn render_help_popup(app: &App, f: &mut Frame<'_>) {
    let theme = app.dashboard.theme();
    let popup_area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(rgb(theme, palette::YELLOW))
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(rgb(theme, palette::YELLOW)))
        .style(Style::default().bg(rgb(theme, palette::PANEL)));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines(theme)))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(rgb(theme, palette::MUTED)),
    ))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn key_line(key: &str, description: &str, theme: Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {key:<12}"),
            Style::default()
                .fg(rgb(theme, palette::YELLOW))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            description.to_string(),
            Style::default().fg(rgb(theme, palette::WHITE)),
        ),
    ])
}

fn build_help_lines(theme: Theme) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(rgb(theme, palette::CYAN))
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled("Energy Dashboard", heading)),
        Line::default(),
        Line::from(Span::styled("Navigation", heading)),
        key_line("Left/Right", "Previous / next page", theme),
        key_line("1-5", "Jump to a page", theme),
        key_line("Tab", "Focus the next KPI card", theme),
        key_line("Shift+Tab", "Focus the previous KPI card", theme),
        key_line("r", "Refresh every chart", theme),
        Line::default(),
        Line::from(Span::styled("Map page", heading)),
        key_line("h j k l", "Pan west / south / north / east", theme),
        key_line("+ / -", "Zoom in / out", theme),
        key_line("0", "Reset the view", theme),
        Line::default(),
        Line::from(Span::styled("Shortcuts", heading)),
    ];

    lines.extend(
        Shortcut::ALL
            .iter()
            .map(|shortcut| key_line(shortcut.keys(), shortcut.description(), theme)),
    );
    lines.extend([
        key_line("?", "Toggle this help", theme),
        key_line("q / Ctrl+C", "Quit", theme),
    ]);

    lines
}
