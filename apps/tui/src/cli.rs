use clap::{CommandFactory, Parser};

#[derive(Debug, Default, Parser)]
#[command(
    name = "energy_dashboard_tui",
    version,
    about = "Energy production dashboard"
)]
pub struct CliArgs {
    /// Run every chart loader, print the results and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the API base URL
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    /// Override the file holding the saved theme
    #[arg(long = "theme-file", value_name = "PATH")]
    pub theme_file: Option<String>,

    /// Override the log file used by the interactive dashboard
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(api_base) = &self.api_base {
            std::env::set_var("DASHBOARD_API_BASE", api_base);
        }
        if let Some(path) = &self.theme_file {
            std::env::set_var("DASHBOARD_THEME_FILE", path);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("DASHBOARD_LOG", path);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("DASHBOARD_TIMEOUT_SECS", timeout.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = CliArgs::parse_from([
            "energy_dashboard_tui",
            "--headless",
            "--json",
            "--api-base",
            "http://example.test/api",
            "--timeout",
            "3",
        ]);
        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.api_base.as_deref(), Some("http://example.test/api"));
        assert_eq!(args.timeout, Some(3));
        assert!(!args.debug);
    }

    #[test]
    fn help_lists_flags() {
        let help = CliArgs::help_text();
        assert!(help.contains("--headless"));
        assert!(help.contains("--theme-file"));
    }
}
