use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use energy_dashboard::map::MAP_TARGET;
use energy_dashboard::notify::{NotificationKind, Visibility};
use energy_dashboard::theme::load_theme;
use energy_dashboard::{Board, Dashboard, LoadReport, Page};
use tokio::sync::oneshot;

use crate::config::Settings;
use crate::http::HttpFetcher;
use crate::storage::FileThemeStore;

/// Banner copied out of the notifier once per frame so rendering stays `&App`.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub message: String,
    pub kind: NotificationKind,
    pub visibility: Visibility,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub status_message: String,
    pub dashboard: Dashboard,
    pub board: Arc<Mutex<Board>>,
    pub fetcher: HttpFetcher,
    pub theme_store: FileThemeStore,
    pub api_base: String,
    pub banner: Option<Banner>,
    pub last_report: Option<LoadReport>,
    pub pending_load: Option<oneshot::Receiver<LoadReport>>,
    pub last_frame: Instant,
    started: Instant,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let theme_store = FileThemeStore::new(&settings.theme_file);
        let theme = load_theme(&theme_store);

        Self {
            running: true,
            show_help: false,
            status_message: String::new(),
            dashboard: Dashboard::new(theme),
            board: Arc::new(Mutex::new(Board::with_targets(Page::all_targets()))),
            fetcher: HttpFetcher::new(&settings.api_base, settings.timeout),
            theme_store,
            api_base: settings.api_base.clone(),
            banner: None,
            last_report: None,
            pending_load: None,
            last_frame: Instant::now(),
            started: Instant::now(),
        }
    }

    /// Milliseconds since start-up; the clock every animation runs on.
    pub fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn update(&mut self) {
        self.last_frame = Instant::now();
        let now = self.now_ms();

        self.dashboard.tick(now);
        self.banner = self
            .dashboard
            .notifier()
            .current(now)
            .map(|(notification, visibility)| Banner {
                message: notification.message.clone(),
                kind: notification.kind,
                visibility,
            });

        self.collect_report();
    }

    fn collect_report(&mut self) {
        let Some(receiver) = self.pending_load.as_mut() else {
            return;
        };

        match receiver.try_recv() {
            Ok(report) => {
                self.status_message = report_summary(&report);
                self.last_report = Some(report);
                self.pending_load = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.status_message = "Chart loading was interrupted".to_string();
                self.pending_load = None;
            }
        }
    }

    /// Runs `f` with the board locked; a poisoned lock still yields the board.
    pub fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        let board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        f(&board)
    }

    pub fn with_board_mut<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        let mut board = self.board.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut board)
    }

    pub fn has_map(&self) -> bool {
        self.with_board(|board| board.map(MAP_TARGET).is_some())
    }
}

pub fn report_summary(report: &LoadReport) -> String {
    if report.failed.is_empty() {
        format!("{} charts loaded", report.rendered)
    } else {
        format!(
            "{} charts loaded, {} failed (see log)",
            report.rendered,
            report.failed.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_settings;

    #[test]
    fn summary_mentions_failures() {
        let report = LoadReport {
            rendered: 11,
            missing: Vec::new(),
            failed: vec![("regionCapacity", "network error".to_string())],
        };
        assert_eq!(report_summary(&report), "11 charts loaded, 1 failed (see log)");
        assert_eq!(report_summary(&LoadReport::default()), "0 charts loaded");
    }

    #[test]
    fn new_app_reads_saved_theme() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("theme"), "light\n")?;
        let app = App::new(&test_settings(dir.path()));
        assert_eq!(app.dashboard.theme(), energy_dashboard::Theme::Light);
        assert!(app.running);
        assert!(!app.has_map());
        Ok(())
    }
}
