use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use energy_dashboard::map::{MapCommand, MapControl};
use energy_dashboard::shortcuts::Shortcut;
use energy_dashboard::{Command, Page};

use crate::app::actions::apply_effect;
use crate::app::App;

pub fn handle_input(app: &mut App, key: KeyEvent) {
    if handle_help_toggle(app, key.code) {
        return;
    }

    if let Some(command) = command_for(key) {
        let now = app.now_ms();
        let effect = app.dashboard.handle(command, now);
        apply_effect(app, effect);
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('?') | KeyCode::F(1)) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

/// Key bindings of the dashboard; `None` for unbound keys.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(Command::Quit),
        KeyCode::Char(c) if ctrl => Shortcut::from_key(true, c).map(Command::Shortcut),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Right => Some(Command::NextPage),
        KeyCode::Left => Some(Command::PreviousPage),
        KeyCode::Char(c @ '1'..='5') => {
            Page::from_index(c as usize - '1' as usize).map(Command::GoTo)
        }
        KeyCode::Tab => Some(Command::FocusNextKpi),
        KeyCode::BackTab => Some(Command::FocusPreviousKpi),
        KeyCode::Char('r') => Some(Command::Refresh),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Map(MapCommand::North)),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::Map(MapCommand::South)),
        KeyCode::Char('l') => Some(Command::Map(MapCommand::East)),
        KeyCode::Char('h') => Some(Command::Map(MapCommand::West)),
        KeyCode::Char('+' | '=') => Some(Command::Map(MapCommand::ZoomIn)),
        KeyCode::Char('-') => Some(Command::Map(MapCommand::ZoomOut)),
        KeyCode::Char('0') => Some(Command::Map(MapCommand::Control(MapControl::ResetView))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_settings;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn bindings() {
        assert_eq!(command_for(press(KeyCode::Right)), Some(Command::NextPage));
        assert_eq!(command_for(press(KeyCode::Char('3'))), Some(Command::GoTo(Page::Production)));
        assert_eq!(command_for(press(KeyCode::Char('6'))), None);
        assert_eq!(
            command_for(ctrl('p')),
            Some(Command::Shortcut(Shortcut::Export))
        );
        assert_eq!(
            command_for(ctrl('d')),
            Some(Command::Shortcut(Shortcut::ToggleTheme))
        );
        assert_eq!(command_for(ctrl('c')), Some(Command::Quit));
        assert_eq!(command_for(ctrl('x')), None);
        assert_eq!(command_for(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn page_keys_navigate_and_notify() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut app = App::new(&test_settings(dir.path()));

        handle_input(&mut app, press(KeyCode::Char('5')));
        app.update();
        assert_eq!(app.dashboard.page(), Page::Map);
        let banner = app.banner.clone().ok_or("no banner")?;
        assert_eq!(banner.message, "Navigating to Map...");

        handle_input(&mut app, press(KeyCode::Right));
        assert_eq!(app.dashboard.page(), Page::Overview);
        Ok(())
    }

    #[test]
    fn help_swallows_keys_until_closed() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut app = App::new(&test_settings(dir.path()));

        handle_input(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_input(&mut app, press(KeyCode::Char('q')));
        assert!(app.running);
        handle_input(&mut app, press(KeyCode::Esc));
        assert!(!app.show_help);
        handle_input(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
        Ok(())
    }

    #[test]
    fn tab_cycles_kpi_focus() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut app = App::new(&test_settings(dir.path()));
        handle_input(&mut app, press(KeyCode::Tab));
        assert_eq!(app.dashboard.kpis().focused(), Some(0));
        handle_input(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.dashboard.kpis().focused(), Some(3));
        Ok(())
    }
}
