use std::fs;
use std::path::{Path, PathBuf};

use energy_dashboard::ThemeStore;

/// Keeps the theme in a one-line file.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    type Error = std::io::Error;

    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|contents| contents.trim().to_string())
    }

    fn save(&self, value: &str) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, format!("{value}\n"))
    }
}
