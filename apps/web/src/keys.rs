use energy_dashboard::map::{MapCommand, MapControl};
use energy_dashboard::shortcuts::Shortcut;
use energy_dashboard::{Command, Page};
use ratzilla::event::KeyCode;

/// What a key press asks of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Dashboard(Command),
    ToggleHelp,
    CloseHelp,
}

pub fn action_for(code: &KeyCode, ctrl: bool, shift: bool) -> Option<KeyAction> {
    let command = match code {
        KeyCode::Char(c) if ctrl => Shortcut::from_key(true, c.to_ascii_lowercase())
            .map(Command::Shortcut)?,
        KeyCode::Char('?') => return Some(KeyAction::ToggleHelp),
        KeyCode::Esc => return Some(KeyAction::CloseHelp),
        KeyCode::Right => Command::NextPage,
        KeyCode::Left => Command::PreviousPage,
        KeyCode::Char(c @ '1'..='5') => Command::GoTo(Page::from_index(*c as usize - '1' as usize)?),
        KeyCode::Tab if shift => Command::FocusPreviousKpi,
        KeyCode::Tab => Command::FocusNextKpi,
        KeyCode::Char('r') => Command::Refresh,
        KeyCode::Char('k') | KeyCode::Up => Command::Map(MapCommand::North),
        KeyCode::Char('j') | KeyCode::Down => Command::Map(MapCommand::South),
        KeyCode::Char('l') => Command::Map(MapCommand::East),
        KeyCode::Char('h') => Command::Map(MapCommand::West),
        KeyCode::Char('+' | '=') => Command::Map(MapCommand::ZoomIn),
        KeyCode::Char('-') => Command::Map(MapCommand::ZoomOut),
        KeyCode::Char('0') => Command::Map(MapCommand::Control(MapControl::ResetView)),
        _ => return None,
    };
    Some(KeyAction::Dashboard(command))
}
