use clap::Parser;
use color_eyre::Result;
use energy_dashboard_tui::app::App;
use energy_dashboard_tui::cli::CliArgs;
use energy_dashboard_tui::config::Settings;
use energy_dashboard_tui::{event, logging, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let settings = Settings::init()?;

    // Without a terminal there is nothing to draw on
    let headless = args.headless || args.json || !is_terminal();
    logging::init(&settings, headless)?;

    if headless {
        return event::run_headless(&settings, args.json).await;
    }

    let mut app = App::new(&settings);
    let mut terminal = terminal::setup()?;

    // Loader futures are not Send; they run as local tasks beside the UI loop
    let local = tokio::task::LocalSet::new();
    let result = local.run_until(event::run(&mut terminal, &mut app)).await;

    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
