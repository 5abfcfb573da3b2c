use energy_dashboard::ThemeStore;
use energy_dashboard::theme::THEME_STORAGE_KEY;
use web_sys::Storage;

/// The theme under [`THEME_STORAGE_KEY`] in `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageThemeStore;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl ThemeStore for LocalStorageThemeStore {
    type Error = String;

    fn load(&self) -> Option<String> {
        local_storage()?.get_item(THEME_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, value: &str) -> Result<(), Self::Error> {
        let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(THEME_STORAGE_KEY, value)
            .map_err(|e| format!("{e:?}"))
    }
}
