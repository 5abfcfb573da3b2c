mod config;
mod fetch;
mod keys;
mod loading;
mod render;
mod storage;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use energy_dashboard::export::DashboardExport;
use energy_dashboard::map::{init_map, MAP_TARGET};
use energy_dashboard::shortcuts::Shortcut;
use energy_dashboard::theme::{load_theme, toggle_theme};
use energy_dashboard::{catalog, load_all, Board, Dashboard, Effect, Page};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::fetch::WebFetcher;
use crate::keys::KeyAction;
use crate::loading::LoadTracker;
use crate::storage::LocalStorageThemeStore;

struct WebApp {
    dashboard: Dashboard,
    show_help: bool,
    store: LocalStorageThemeStore,
    api_base: String,
}

type LoadSlot = Rc<RefCell<LoadTracker>>;

fn now_ms() -> f64 {
    js_sys::Date::now()
}

fn main() -> io::Result<()> {
    tracing_wasm::set_as_global_default();

    let api_base = config::api_base();
    let fetcher = Rc::new(WebFetcher::new(&api_base));
    let store = LocalStorageThemeStore;
    let app = Rc::new(RefCell::new(WebApp {
        dashboard: Dashboard::new(load_theme(&store)),
        show_help: false,
        store,
        api_base,
    }));
    let board = Rc::new(RefCell::new(Board::with_targets(Page::all_targets())));
    let load_slot: LoadSlot = Rc::new(RefCell::new(LoadTracker::default()));

    start_loading(&board, &fetcher, &load_slot);
    prevent_browser_shortcuts();

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let app = app.clone();
        let board = board.clone();
        let load_slot = load_slot.clone();
        move |event| {
            let Some(action) = keys::action_for(&event.code, event.ctrl, event.shift) else {
                return;
            };
            let mut app = app.borrow_mut();
            match action {
                KeyAction::ToggleHelp => app.show_help = !app.show_help,
                KeyAction::CloseHelp => app.show_help = false,
                KeyAction::Dashboard(_) if app.show_help => {}
                KeyAction::Dashboard(command) => {
                    let effect = app.dashboard.handle(command, now_ms());
                    apply_effect(&mut app, effect, &board, &fetcher, &load_slot);
                }
            }
        }
    });

    terminal.draw_web(move |f| {
        let mut app = app.borrow_mut();
        let now = now_ms();
        app.dashboard.tick(now);
        let banner = app
            .dashboard
            .notifier()
            .current(now)
            .map(|(notification, visibility)| render::Banner {
                message: notification.message.clone(),
                kind: notification.kind,
                visibility,
            });

        let board = board.borrow();
        let loads = load_slot.borrow();
        render::render_dashboard(
            f,
            &render::View {
                dashboard: &app.dashboard,
                board: &board,
                banner: banner.as_ref(),
                report: loads.report(),
                show_help: app.show_help,
                api_base: &app.api_base,
            },
        );
    });

    Ok(())
}

/// Clears the charts and runs every loader again; the map is built once.
fn start_loading(board: &Rc<RefCell<Board>>, fetcher: &Rc<WebFetcher>, load_slot: &LoadSlot) {
    board.borrow_mut().clear_charts();
    let has_map = board.borrow().map(MAP_TARGET).is_some();
    if !has_map {
        init_map(board.as_ref());
    }
    let ticket = load_slot.borrow_mut().begin();

    let board = board.clone();
    let fetcher = fetcher.clone();
    let load_slot = load_slot.clone();
    spawn_local(async move {
        let report = load_all(&catalog::all(), fetcher.as_ref(), board.as_ref()).await;
        load_slot.borrow_mut().finish(ticket, report);
    });
}

fn apply_effect(
    app: &mut WebApp,
    effect: Effect,
    board: &Rc<RefCell<Board>>,
    fetcher: &Rc<WebFetcher>,
    load_slot: &LoadSlot,
) {
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::Reload => start_loading(board, fetcher, load_slot),
        Effect::Export => {
            let export =
                DashboardExport::snapshot(String::from(js_sys::Date::new_0().to_iso_string()));
            match export.to_pretty_json() {
                Ok(json) => web_sys::console::log_2(&"Dashboard data:".into(), &json.into()),
                Err(error) => tracing::error!(%error, "failed to serialize dashboard export"),
            }
        }
        Effect::ToggleTheme => {
            let theme = toggle_theme(&app.store, app.dashboard.theme());
            app.dashboard.set_theme(theme);
        }
        Effect::Map(command) => {
            if let Some(map) = board.borrow_mut().map_mut(MAP_TARGET) {
                map.handle(command);
            }
        }
    }
}

/// Keeps Ctrl/Cmd+P and Ctrl/Cmd+D from printing or bookmarking the page.
fn prevent_browser_shortcuts() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let listener = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
        |event: web_sys::KeyboardEvent| {
            let key = event.key().to_ascii_lowercase();
            let mut chars = key.chars();
            let single = match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            };
            let modifier = event.ctrl_key() || event.meta_key();
            if modifier && single.and_then(|c| Shortcut::from_key(true, c)).is_some() {
                event.prevent_default();
            }
        },
    );

    if let Err(error) =
        window.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
    {
        tracing::warn!(?error, "could not install shortcut listener");
    }
    listener.forget();
}
