use std::sync::Arc;

use energy_dashboard::export::DashboardExport;
use energy_dashboard::map::{init_map, MAP_TARGET};
use energy_dashboard::theme::toggle_theme;
use energy_dashboard::{catalog, load_all, Board, Effect};
use tokio::sync::oneshot;

use crate::app::App;

/// Clears rendered charts and reloads every loader on the local task set.
///
/// The map survives a reload; it is only built the first time.
pub fn start_loading(app: &mut App) {
    app.with_board_mut(Board::clear_charts);
    if !app.has_map() {
        init_map(&*app.board);
    }

    let board = Arc::clone(&app.board);
    let fetcher = app.fetcher.clone();
    let (sender, receiver) = oneshot::channel();

    tokio::task::spawn_local(async move {
        let specs = catalog::all();
        let report = load_all(&specs, &fetcher, &*board).await;
        // The receiver is gone when a newer load replaced this one.
        let _ = sender.send(report);
    });

    app.pending_load = Some(receiver);
    app.status_message = "Loading charts...".to_string();
}

pub fn apply_effect(app: &mut App, effect: Effect) {
    match effect {
        Effect::None => {}
        Effect::Reload => start_loading(app),
        Effect::Export => export_snapshot(app),
        Effect::ToggleTheme => {
            let theme = toggle_theme(&app.theme_store, app.dashboard.theme());
            app.dashboard.set_theme(theme);
            app.status_message = format!("Theme: {theme}");
        }
        Effect::Map(command) => app.with_board_mut(|board| {
            if let Some(map) = board.map_mut(MAP_TARGET) {
                map.handle(command);
            }
        }),
        Effect::Quit => app.running = false,
    }
}

/// Writes the dashboard snapshot to the log, the terminal's stand-in for the console.
fn export_snapshot(app: &mut App) {
    let export = DashboardExport::snapshot(chrono::Utc::now().to_rfc3339());
    match export.to_pretty_json() {
        Ok(json) => {
            tracing::info!(target: "energy_dashboard_tui::export", "dashboard data:\n{json}");
            app.status_message = format!("Exported snapshot at {}", export.timestamp);
        }
        Err(error) => {
            tracing::error!(%error, "failed to serialize dashboard export");
            app.status_message = format!("Export failed: {error}");
        }
    }
}
