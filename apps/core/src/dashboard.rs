//! Interactive state shared by both frontends: the current page, theme,
//! notification banner and KPI strip.

use crate::domain::Page;
use crate::kpi::KpiBoard;
use crate::map::MapCommand;
use crate::notify::{NotificationKind, Notifier};
use crate::shortcuts::Shortcut;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PreviousPage,
    GoTo(Page),
    Refresh,
    Shortcut(Shortcut),
    FocusNextKpi,
    FocusPreviousKpi,
    Map(MapCommand),
    Quit,
}

/// Work the frontend still has to do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Reload,
    Export,
    ToggleTheme,
    Map(MapCommand),
    Quit,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    page: Page,
    theme: Theme,
    notifier: Notifier,
    kpis: KpiBoard,
}

impl Dashboard {
    pub fn new(theme: Theme) -> Self {
        Self {
            page: Page::Overview,
            theme,
            notifier: Notifier::default(),
            kpis: KpiBoard::default(),
        }
    }

    pub const fn page(&self) -> Page {
        self.page
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub const fn kpis(&self) -> &KpiBoard {
        &self.kpis
    }

    pub fn notifier(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    /// Advances time-driven state to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        if self.kpis.is_animating() {
            self.kpis.tick(now_ms);
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind, now_ms: f64) {
        self.notifier.show(message, kind, now_ms);
    }

    pub fn handle(&mut self, command: Command, now_ms: f64) -> Effect {
        match command {
            Command::NextPage => self.navigate(self.page.next(), now_ms),
            Command::PreviousPage => self.navigate(self.page.previous(), now_ms),
            Command::GoTo(page) => self.navigate(page, now_ms),
            Command::Refresh => {
                tracing::info!("refreshing dashboard");
                self.kpis.restart();
                self.notify("✅ Dashboard refreshed", NotificationKind::Success, now_ms);
                Effect::Reload
            }
            Command::Shortcut(shortcut) => {
                let (message, kind) = shortcut.notification();
                self.notify(message, kind, now_ms);
                match shortcut {
                    Shortcut::Export => Effect::Export,
                    Shortcut::ToggleTheme => Effect::ToggleTheme,
                }
            }
            Command::FocusNextKpi => {
                self.kpis.focus_next();
                Effect::None
            }
            Command::FocusPreviousKpi => {
                self.kpis.focus_previous();
                Effect::None
            }
            Command::Map(map) if self.page == Page::Map => Effect::Map(map),
            Command::Map(_) => Effect::None,
            Command::Quit => Effect::Quit,
        }
    }

    fn navigate(&mut self, page: Page, now_ms: f64) -> Effect {
        if page != self.page {
            tracing::debug!(from = self.page.label(), to = page.label(), "navigate");
            self.page = page;
            self.kpis.clear_focus();
            self.notify(
                format!("Navigating to {}...", page.label()),
                NotificationKind::Info,
                now_ms,
            );
        }
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Visibility;

    #[test]
    fn navigation_shows_an_info_banner() {
        let mut dashboard = Dashboard::new(Theme::Dark);
        assert_eq!(dashboard.handle(Command::NextPage, 0.0), Effect::None);
        assert_eq!(dashboard.page(), Page::Consumption);

        let Some((banner, visibility)) = dashboard.notifier().current(10.0) else {
            panic!("no banner after navigation");
        };
        assert_eq!(banner.message, "Navigating to Consumption...");
        assert_eq!(banner.kind, NotificationKind::Info);
        assert_eq!(visibility, Visibility::Visible);
    }

    #[test]
    fn staying_on_a_page_is_silent() {
        let mut dashboard = Dashboard::new(Theme::Dark);
        dashboard.handle(Command::GoTo(Page::Overview), 0.0);
        assert!(dashboard.notifier().current(0.0).is_none());
    }

    #[test]
    fn shortcuts_notify_and_hand_off() {
        let mut dashboard = Dashboard::new(Theme::Dark);
        assert_eq!(
            dashboard.handle(Command::Shortcut(Shortcut::Export), 0.0),
            Effect::Export
        );
        assert_eq!(
            dashboard.handle(Command::Shortcut(Shortcut::ToggleTheme), 0.0),
            Effect::ToggleTheme
        );
        let message = dashboard
            .notifier()
            .current(1.0)
            .map(|(banner, _)| banner.message.clone());
        assert_eq!(message.as_deref(), Some("🎨 Theme changed"));
    }

    #[test]
    fn map_keys_only_apply_on_the_map_page() {
        let mut dashboard = Dashboard::new(Theme::Light);
        assert_eq!(
            dashboard.handle(Command::Map(MapCommand::ZoomIn), 0.0),
            Effect::None
        );
        dashboard.handle(Command::GoTo(Page::Map), 0.0);
        assert_eq!(
            dashboard.handle(Command::Map(MapCommand::ZoomIn), 0.0),
            Effect::Map(MapCommand::ZoomIn)
        );
    }

    #[test]
    fn refresh_restarts_counters() {
        let mut dashboard = Dashboard::new(Theme::Dark);
        dashboard.tick(0.0);
        dashboard.tick(10_000.0);
        assert!(!dashboard.kpis().is_animating());

        assert_eq!(dashboard.handle(Command::Refresh, 10_000.0), Effect::Reload);
        assert!(dashboard.kpis().is_animating());
        assert_eq!(dashboard.kpis().display(0), "0 MW");
    }
}
