use std::fmt;

use crate::palette::Rgb;

/// Storage key holding the saved theme.
pub const THEME_STORAGE_KEY: &str = "dashboardTheme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    /// The dark palette with every color inverted.
    Light,
}

impl Theme {
    /// Anything other than `"light"` is dark, including no saved value.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn apply(self, color: Rgb) -> Rgb {
        match self {
            Self::Dark => color,
            Self::Light => color.inverted(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a frontend keeps the theme between sessions.
pub trait ThemeStore {
    type Error: fmt::Display;

    fn load(&self) -> Option<String>;

    fn save(&self, value: &str) -> Result<(), Self::Error>;
}

pub fn load_theme<S: ThemeStore + ?Sized>(store: &S) -> Theme {
    Theme::from_stored(store.load().as_deref())
}

/// Flips `current` and persists the result. A failed write keeps the new
/// theme for this session.
pub fn toggle_theme<S: ThemeStore + ?Sized>(store: &S, current: Theme) -> Theme {
    let next = current.toggled();
    if let Err(error) = store.save(next.as_str()) {
        tracing::warn!(%error, theme = %next, "could not persist theme");
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{CYAN, WHITE};
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore(RefCell<Option<String>>);

    impl ThemeStore for MemoryStore {
        type Error = std::convert::Infallible;

        fn load(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn save(&self, value: &str) -> Result<(), Self::Error> {
            *self.0.borrow_mut() = Some(value.to_string());
            Ok(())
        }
    }

    struct ReadOnlyStore;

    impl ThemeStore for ReadOnlyStore {
        type Error = &'static str;

        fn load(&self) -> Option<String> {
            None
        }

        fn save(&self, _value: &str) -> Result<(), Self::Error> {
            Err("storage disabled")
        }
    }

    #[test]
    fn only_light_is_light() {
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("LIGHT")), Theme::Dark);
        assert_eq!(Theme::from_stored(None), Theme::Dark);
    }

    #[test]
    fn toggle_persists_the_new_theme() {
        let store = MemoryStore::default();
        let theme = load_theme(&store);
        assert_eq!(theme, Theme::Dark);

        let theme = toggle_theme(&store, theme);
        assert_eq!(theme, Theme::Light);
        assert_eq!(store.load().as_deref(), Some("light"));
        assert_eq!(load_theme(&store), Theme::Light);

        assert_eq!(toggle_theme(&store, theme), Theme::Dark);
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn failed_save_still_toggles() {
        assert_eq!(toggle_theme(&ReadOnlyStore, Theme::Dark), Theme::Light);
    }

    #[test]
    fn light_inverts_colors() {
        assert_eq!(Theme::Light.apply(WHITE), Rgb(0, 0, 0));
        assert_eq!(Theme::Dark.apply(CYAN), CYAN);
        assert_eq!(Theme::Light.apply(CYAN).inverted(), CYAN);
    }
}
