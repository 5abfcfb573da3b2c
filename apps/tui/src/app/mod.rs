// App module for the energy dashboard terminal frontend
// Holds application state and maps key presses to dashboard commands

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::App;

/// Settings pointing at a scratch directory and an unreachable API.
#[cfg(test)]
pub(crate) fn test_settings(dir: &std::path::Path) -> crate::config::Settings {
    crate::config::Settings {
        api_base: "http://127.0.0.1:9/api".to_string(),
        theme_file: dir.join("theme"),
        log_file: dir.join("dashboard.log"),
        timeout: std::time::Duration::from_millis(500),
        debug: false,
    }
}
