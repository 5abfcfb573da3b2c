use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::actions::start_loading;
use crate::app::{handle_input, App};
use crate::terminal::Tui;
use crate::ui;

/// Roughly 30 frames per second; also how often loader tasks get to run.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Run the main application event loop.
///
/// Must be awaited inside a [`tokio::task::LocalSet`]: chart loaders are
/// spawned as local tasks and progress while this loop sleeps.
pub async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    start_loading(app);

    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_input(app, key),
                // The next frame redraws at the new size.
                Event::Resize(_, _)
                | Event::Key(_)
                | Event::Mouse(_)
                | Event::FocusGained
                | Event::FocusLost
                | Event::Paste(_) => {}
            }
        }

        if !app.running {
            break;
        }

        tokio::time::sleep(FRAME_INTERVAL).await;
    }

    Ok(())
}
