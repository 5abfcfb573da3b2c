// UI module for the energy dashboard terminal frontend
// Handles all rendering; state lives in `App`

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::dashboard::render_dashboard(app, f);

    if app.show_help {
        screens::help::render_help_popup(app, f);
    }
}
