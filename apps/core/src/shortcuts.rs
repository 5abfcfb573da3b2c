use crate::notify::NotificationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Export,
    ToggleTheme,
}

impl Shortcut {
    pub const ALL: [Self; 2] = [Self::Export, Self::ToggleTheme];

    /// Ctrl+P and Ctrl+D; the key is matched case-sensitively.
    pub const fn from_key(ctrl: bool, key: char) -> Option<Self> {
        if !ctrl {
            return None;
        }
        match key {
            'p' => Some(Self::Export),
            'd' => Some(Self::ToggleTheme),
            _ => None,
        }
    }

    pub const fn keys(self) -> &'static str {
        match self {
            Self::Export => "Ctrl+P",
            Self::ToggleTheme => "Ctrl+D",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Export => "Export data",
            Self::ToggleTheme => "Toggle theme",
        }
    }

    pub const fn notification(self) -> (&'static str, NotificationKind) {
        match self {
            Self::Export => ("✅ Data exported to console", NotificationKind::Success),
            Self::ToggleTheme => ("🎨 Theme changed", NotificationKind::Success),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_bindings() {
        assert_eq!(Shortcut::from_key(true, 'p'), Some(Shortcut::Export));
        assert_eq!(Shortcut::from_key(true, 'd'), Some(Shortcut::ToggleTheme));
        assert_eq!(Shortcut::from_key(true, 'x'), None);
    }

    #[test]
    fn plain_keys_are_ignored() {
        assert_eq!(Shortcut::from_key(false, 'p'), None);
        assert_eq!(Shortcut::from_key(false, 'd'), None);
    }

    #[test]
    fn help_lines() {
        let help = Shortcut::ALL
            .iter()
            .map(|shortcut| format!("{}: {}", shortcut.keys(), shortcut.description()))
            .collect::<Vec<_>>();
        assert_eq!(help, vec!["Ctrl+P: Export data", "Ctrl+D: Toggle theme"]);
    }
}
