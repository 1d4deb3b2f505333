//! Pokedex TUI - browse, page through and search the PokeAPI catalog

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api::{ApiError, CatalogClient};
use pokedex::components::{
    Component, DetailCard, DetailCardProps, DexList, DexListProps, PagerBar, PagerBarProps,
    SearchBar, SearchBarProps,
};
use pokedex::config::{CatalogConfig, DEFAULT_API_BASE, DEFAULT_LIST_LIMIT, DEFAULT_TIMEOUT_SECS};
use pokedex::effect::Effect;
use pokedex::reducer::reducer;
use pokedex::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse and search the PokeAPI catalog")]
struct Args {
    /// Catalog service root
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Number of entries requested from the list endpoint
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u16,

    /// Cap on concurrent detail requests (default: all at once)
    #[arg(long)]
    max_in_flight: Option<usize>,

    /// Per-request timeout in seconds (minimum 1)
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Write diagnostics to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            list_limit: self.limit,
            max_in_flight: self.max_in_flight.filter(|&n| n > 0),
            timeout: Duration::from_secs(self.timeout_secs),
            ..CatalogConfig::with_api_base(self.api_base.clone())
        }
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    DexList,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    DexList,
    Search,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        if self.search.active {
            Some(PokedexComponentId::Search)
        } else {
            Some(PokedexComponentId::DexList)
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        if self.search.active {
            Some(PokedexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::DexList => PokedexContext::DexList,
            PokedexComponentId::Search => PokedexContext::Search,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::DexList
    }
}

/// Log to `path` only; the terminal belongs to the UI.
fn init_tracing(path: &Path, level: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| io::Error::other(format!("tracing init failed: {err}")))
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_tracing(path, &args.log_level)?;
    }

    let config = args.catalog_config();
    let client = CatalogClient::new(config).map_err(api_error)?;
    tracing::info!(
        api_base = %client.config().api_base,
        limit = client.config().list_limit,
        "starting"
    );

    let debug = DebugSession::new(args.debug);
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, client).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

struct PokedexUi {
    search: SearchBar,
    list: DexList,
    detail: DetailCard,
    pager: PagerBar,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            search: SearchBar,
            list: DexList::new(),
            detail: DetailCard,
            pager: PagerBar::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(36), Constraint::Percentage(64)])
            .split(rows[1]);

        event_ctx.set_component_area(PokedexComponentId::Search, rows[0]);
        self.search.render(
            frame,
            rows[0],
            SearchBarProps {
                query: &state.search.query,
                active: state.search.active,
            },
        );

        event_ctx.set_component_area(PokedexComponentId::DexList, body[0]);
        let list_props = DexListProps {
            entries: state.visible_entries(),
            selected: state.selected,
            page: state.page,
            page_count: state.page_count(),
            loading: state.catalog.is_loading(),
            is_focused: render_ctx.is_focused() && !state.search.active,
        };
        self.list.render(frame, body[0], list_props);

        self.detail.render(
            frame,
            body[1],
            DetailCardProps {
                detail: state.detail.as_ref(),
                lookup: state.lookup,
            },
        );

        let message = if state.catalog.is_loading() {
            Some("Loading catalog...")
        } else {
            state.message.as_deref()
        };
        let pager_props = PagerBarProps {
            page: state.page,
            page_count: state.page_count(),
            has_prev: state.has_prev_page(),
            has_next: state.has_next_page(),
            searching: state.search.active,
            message,
        };
        self.pager.render(frame, rows[2], pager_props);
    }

    fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DexListProps {
            entries: state.visible_entries(),
            selected: state.selected,
            page: state.page,
            page_count: state.page_count(),
            loading: state.catalog.is_loading(),
            is_focused: true,
        };
        let actions: Vec<_> = self.list.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = SearchBarProps {
            query: &state.search.query,
            active: state.search.active,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: state.search.active,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

fn api_error(error: ApiError) -> io::Error {
    io::Error::other(format!("http client error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    client: CatalogClient,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(PokedexComponentId::DexList, move |event, state| {
        ui_list
            .borrow_mut()
            .handle_list_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(PokedexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        EventKind::Key(key) if !state.search.active => match key.code {
            KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            KeyCode::Char('/') => HandlerResponse::action(Action::SearchStart),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &CatalogClient) {
    match effect {
        Effect::LoadCatalog => {
            let client = client.clone();
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match client.load_catalog().await {
                    Ok(entries) => Action::CatalogDidLoad(entries),
                    Err(error) => Action::CatalogDidError(error.to_string()),
                }
            });
        }
        Effect::SearchEntry { query } => {
            let client = client.clone();
            let key = format!("search_{query}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match client.lookup(&query).await {
                    Ok(detail) => Action::SearchDidLoad(detail),
                    Err(ApiError::NotFound(_)) => Action::SearchDidMiss { query },
                    Err(error) => {
                        tracing::warn!(%query, %error, "search failed");
                        Action::SearchDidError {
                            query,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadEntry { name } => {
            let client = client.clone();
            let key = format!("entry_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match client.lookup(&name).await {
                    Ok(detail) => Action::EntryDidLoad(detail),
                    Err(error) => {
                        tracing::warn!(%name, %error, "entry fetch failed");
                        Action::EntryDidError {
                            name,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
    }
}
