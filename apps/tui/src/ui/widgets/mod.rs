pub mod charts;
pub mod map;
pub mod popup;

use energy_dashboard::palette::{self, Rgb};
use energy_dashboard::Theme;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

/// Terminal color for a dashboard color under `theme`.
pub const fn rgb(theme: Theme, color: Rgb) -> Color {
    let Rgb(r, g, b) = theme.apply(color);
    Color::Rgb(r, g, b)
}

pub fn panel_block(title: &str, theme: Theme) -> Block<'static> {
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

/// Shortens `text` to `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_inverts_terminal_colors() {
        assert_eq!(rgb(Theme::Dark, palette::CYAN), Color::Rgb(0x00, 0xd4, 0xff));
        assert_eq!(rgb(Theme::Light, palette::CYAN), Color::Rgb(0xff, 0x2b, 0x00));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Île-de-France", 20), "Île-de-France");
        assert_eq!(truncate("Île-de-France", 6), "Île-d…");
    }
}
