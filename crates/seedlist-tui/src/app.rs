//! App: component-based event loop.
//!
//! - `App` owns all components and `AppState` (read-only for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the terminal
//!   reader and from background API tasks.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Network effects requested by the AppContainer run on spawned tasks; the
//!   previous task of the same kind is aborted when a new one starts.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use seedlist_core::api::{ApiClient, ApiError};
use seedlist_core::config::{Config, Settings};
use seedlist_core::models::{SavedPlaylist, SearchResultItem};
use seedlist_core::playlist::PlaylistTrack;
use seedlist_core::request::{RequestKind, RequestToken};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    bootstrap::{self, Mount},
    component::Component,
    components::{
        alert_overlay::AlertOverlay,
        header::Header,
        help_overlay::HelpOverlay,
        landing::draw_landing,
        log_panel::LogPanel,
        playlist_panel::PlaylistPanel,
        results_list::ResultsList,
        search_panel::SearchPanel,
        seeds_panel::{SeedsPanel, SEEDS_PANEL_HEIGHT},
        targets_panel::{TargetsPanel, TARGETS_PANEL_HEIGHT},
    },
    container::{AppContainer, Effect, Outcome},
    focus::FocusRing,
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Mounted(Mount),
    Searched(RequestToken, Result<Vec<SearchResultItem>, ApiError>),
    Recommended(RequestToken, Result<Vec<PlaylistTrack>, ApiError>),
    Saved(RequestToken, Result<SavedPlaylist, ApiError>),
}

/// Pane rectangles from the last frame, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
struct PaneAreas {
    header: Rect,
    search: Rect,
    results: Rect,
    seeds: Rect,
    targets: Rect,
    playlist: Rect,
    log_panel: Rect,
}

const LOG_PANEL_HEIGHT: u16 = 10;

pub struct App {
    state: AppState,
    /// Bundled endpoint config before settings overrides.
    base_config: Config,
    settings: Settings,
    api: ApiClient,

    header: Header,
    search_panel: SearchPanel,
    results_list: ResultsList,
    seeds_panel: SeedsPanel,
    targets_panel: TargetsPanel,
    playlist_panel: PlaylistPanel,
    log_panel: LogPanel,
    help_overlay: HelpOverlay,
    alert_overlay: AlertOverlay,

    focus: FocusRing,
    pane_areas: PaneAreas,
    toast: ToastManager,

    tx: Option<mpsc::Sender<AppMessage>>,
    in_flight: HashMap<RequestKind, JoinHandle<()>>,
    should_quit: bool,
}

impl App {
    pub fn new(base_config: Config, settings: Settings, api: ApiClient, log_path: PathBuf) -> Self {
        let config = settings.apply(base_config.clone());
        Self {
            state: AppState::new(config, log_path),
            base_config,
            settings,
            api,
            header: Header::new(),
            search_panel: SearchPanel::new(),
            results_list: ResultsList::new(),
            seeds_panel: SeedsPanel::new(),
            targets_panel: TargetsPanel::new(),
            playlist_panel: PlaylistPanel::new(),
            log_panel: LogPanel::new(),
            help_overlay: HelpOverlay::new(),
            alert_overlay: AlertOverlay::new(),
            focus: FocusRing::default(),
            pane_areas: PaneAreas::default(),
            toast: ToastManager::new(),
            tx: None,
            in_flight: HashMap::new(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("terminal ready, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        // Polls so the thread exits once the loop drops its receiver.
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(250)).and_then(|ready| {
                    if ready {
                        event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                }) {
                    Ok(Some(ev)) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        error!("terminal event error: {}", e);
                        break;
                    }
                }
            }
        });

        info!("seedlist started, api {}", self.state.config.api_url);
        self.start_bootstrap();

        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut log_refresh = tokio::time::interval(Duration::from_secs(1));
        log_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    while let Ok(next) = rx.try_recv() {
                        self.handle_message(next);
                    }
                    needs_redraw = true;
                }

                _ = ui_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }

                _ = log_refresh.tick() => {
                    if self.log_panel.visible {
                        self.reload_tui_log();
                        needs_redraw = true;
                    }
                }
            }
        }
        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return;
                    }
                    for a in self.handle_key(key) {
                        self.dispatch(a);
                    }
                }
                Event::Mouse(mouse) => {
                    for a in self.handle_mouse(mouse) {
                        self.dispatch(a);
                    }
                }
                _ => {}
            },

            AppMessage::Mounted(mount) => {
                self.in_flight.remove(&RequestKind::Auth);
                let targets = self.settings.targets;
                self.state
                    .apply_mount(mount, || AppContainer::new(targets));
                self.sync_focus_ring();
            }

            AppMessage::Searched(token, result) => {
                let Some(container) = self.state.container.as_mut() else {
                    return;
                };
                // Search failures are logged only.
                let outcome = container.apply_search(token, result);
                self.finish_request(RequestKind::Search, &outcome);
            }

            AppMessage::Recommended(token, result) => {
                let Some(container) = self.state.container.as_mut() else {
                    return;
                };
                let outcome = container.apply_recommendation(token, result);
                let count = container.playlist().len();
                self.finish_request(RequestKind::Recommend, &outcome);
                match outcome {
                    Outcome::Applied => {
                        self.toast
                            .resolve_spinner(Severity::Success, format!("{} tracks", count));
                        self.focus.set(ComponentId::PlaylistPanel);
                    }
                    Outcome::Failed(_) => self
                        .toast
                        .resolve_spinner(Severity::Error, "could not get a playlist"),
                    Outcome::Stale => {}
                }
            }

            AppMessage::Saved(token, result) => {
                let Some(container) = self.state.container.as_mut() else {
                    return;
                };
                let outcome = container.apply_save(token, result);
                self.finish_request(RequestKind::Save, &outcome);
                match outcome {
                    Outcome::Applied => self
                        .toast
                        .resolve_spinner(Severity::Success, "playlist saved to Spotify"),
                    Outcome::Failed(_) => self
                        .toast
                        .resolve_spinner(Severity::Error, "could not save the playlist"),
                    Outcome::Stale => {}
                }
            }
        }
    }

    fn finish_request(&mut self, kind: RequestKind, outcome: &Outcome) {
        if *outcome != Outcome::Stale {
            self.in_flight.remove(&kind);
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // The alert is modal.
        if self.state.alert().is_some() {
            return self.alert_overlay.handle_key(key, &self.state);
        }

        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        if self.state.input_mode == InputMode::Insert {
            return match key.code {
                KeyCode::Tab => vec![Action::StopEditing, Action::FocusNext],
                KeyCode::BackTab => vec![Action::StopEditing, Action::FocusPrev],
                _ => self.search_panel.handle_key(key, &self.state),
            };
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('L') => return vec![Action::ToggleLogs],
            KeyCode::Char('r') => return vec![Action::Reload],
            KeyCode::Char('l')
                if !matches!(
                    self.focus.current(),
                    Some(ComponentId::SearchPanel | ComponentId::TargetsPanel)
                ) =>
            {
                return vec![Action::ActivateSessionLink];
            }
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            _ => {}
        }

        if self.state.container().is_some() {
            match key.code {
                KeyCode::Char('/') => {
                    return vec![
                        Action::FocusPane(ComponentId::SearchPanel),
                        Action::StartEditing,
                    ]
                }
                KeyCode::Char('t') => return vec![Action::ToggleSearchType],
                KeyCode::Char('g') => return vec![Action::GetPlaylist],
                KeyCode::Char('s') => return vec![Action::SavePlaylist],
                KeyCode::Char('x') => return vec![Action::ClearPlaylist],
                KeyCode::Char('o') => return vec![Action::OpenSavedPlaylist],
                KeyCode::Char('y') => return vec![Action::CopySavedPlaylist],
                KeyCode::Char(c @ '1'..='5') => {
                    let pos = c as usize - '1' as usize;
                    return match self.focus_slots().get(pos) {
                        Some(id) => vec![Action::FocusPane(*id)],
                        None => vec![],
                    };
                }
                _ => {}
            }
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::SearchPanel) => self.search_panel.handle_key(key, s),
            Some(ComponentId::ResultsList) => self.results_list.handle_key(key, s),
            Some(ComponentId::SeedsPanel) => self.seeds_panel.handle_key(key, s),
            Some(ComponentId::TargetsPanel) => self.targets_panel.handle_key(key, s),
            Some(ComponentId::PlaylistPanel) => self.playlist_panel.handle_key(key, s),
            Some(ComponentId::LogPanel) => self.log_panel.handle_key(key, s),
            Some(ComponentId::HelpOverlay) | Some(ComponentId::AlertOverlay) | None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }

        let s = &self.state;
        if s.alert().is_some() {
            return self.alert_overlay.handle_mouse(event, Rect::default(), s);
        }
        if self.help_overlay.visible {
            return vec![Action::ToggleHelp];
        }

        let (col, row) = (event.column, event.row);
        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas.clone();
        if hit(areas.header, col, row) {
            return self.header.handle_mouse(event, s);
        }

        // Clicking outside the search pane leaves the search field.
        let mut actions = if s.input_mode == InputMode::Insert && !hit(areas.search, col, row) {
            vec![Action::StopEditing]
        } else {
            vec![]
        };
        let clicked = if hit(areas.search, col, row) {
            Some((
                ComponentId::SearchPanel,
                self.search_panel.handle_mouse(event, areas.search, s),
            ))
        } else if hit(areas.results, col, row) {
            Some((
                ComponentId::ResultsList,
                self.results_list.handle_mouse(event, areas.results, s),
            ))
        } else if hit(areas.seeds, col, row) {
            Some((
                ComponentId::SeedsPanel,
                self.seeds_panel.handle_mouse(event, areas.seeds, s),
            ))
        } else if hit(areas.targets, col, row) {
            Some((
                ComponentId::TargetsPanel,
                self.targets_panel.handle_mouse(event, areas.targets, s),
            ))
        } else if hit(areas.playlist, col, row) {
            Some((
                ComponentId::PlaylistPanel,
                self.playlist_panel.handle_mouse(event, areas.playlist, s),
            ))
        } else if hit(areas.log_panel, col, row) {
            Some((
                ComponentId::LogPanel,
                self.log_panel.handle_mouse(event, areas.log_panel, s),
            ))
        } else {
            None
        };
        if let Some((id, mut pane_actions)) = clicked {
            if self.focus.current() != Some(id) {
                actions.push(Action::FocusPane(id));
            }
            actions.append(&mut pane_actions);
        }
        actions
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.search_panel.on_action(&action, s));
            out.extend(self.results_list.on_action(&action, s));
            out.extend(self.seeds_panel.on_action(&action, s));
            out.extend(self.targets_panel.on_action(&action, s));
            out.extend(self.playlist_panel.on_action(&action, s));
            out.extend(self.log_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        if action != Action::Noop {
            debug!("apply_action: {:?}", action);
        }
        match action {
            // ── Search ────────────────────────────────────────────────────────
            Action::StartEditing => {
                if self.state.container().is_some() {
                    self.state.input_mode = InputMode::Insert;
                    self.focus.set(ComponentId::SearchPanel);
                } else {
                    self.search_panel.input.deactivate();
                }
            }
            Action::StopEditing => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::QueryChanged(q) => {
                if let Some(c) = self.state.container.as_mut() {
                    c.set_query(&q);
                    if q.is_empty() {
                        self.abort(RequestKind::Search);
                    }
                }
            }
            Action::SubmitSearch => {
                let effect = self.state.container.as_mut().and_then(|c| c.submit_search());
                self.run_effect(effect);
            }
            Action::SelectSearchType(id) => {
                let effect = self
                    .state
                    .container
                    .as_mut()
                    .and_then(|c| c.select_search_type(&id));
                self.run_effect(effect);
            }
            Action::ToggleSearchType => {
                let effect = self
                    .state
                    .container
                    .as_mut()
                    .and_then(|c| c.toggle_search_type());
                self.run_effect(effect);
            }

            // ── Seeds ─────────────────────────────────────────────────────────
            Action::AddSeed(idx) => {
                if let Some(c) = self.state.container.as_mut() {
                    c.add_seed(idx);
                }
            }
            Action::RemoveSeed(kind, id) => {
                if let Some(c) = self.state.container.as_mut() {
                    c.remove_seed(kind, &id);
                }
            }

            // ── Playlist ──────────────────────────────────────────────────────
            Action::GetPlaylist => {
                let effect = self.state.container.as_mut().and_then(|c| c.get_playlist());
                if effect.is_some() {
                    self.abort(RequestKind::Search);
                }
                self.run_effect(effect);
            }
            Action::SavePlaylist => {
                let effect = self.state.container.as_mut().and_then(|c| c.save_playlist());
                if effect.is_none() {
                    debug!("save ignored: no playlist shown");
                }
                self.run_effect(effect);
            }
            Action::ClearPlaylist => {
                if let Some(c) = self.state.container.as_mut() {
                    c.clear_playlist();
                }
            }
            Action::NudgeTarget(kind, up) => {
                if let Some(c) = self.state.container.as_mut() {
                    c.nudge_target(kind, up);
                }
            }

            // ── Links ─────────────────────────────────────────────────────────
            Action::Navigate(url) => self.navigate(&url),
            Action::ActivateSessionLink => {
                if let Some(link) = self.state.session_link.clone() {
                    if let Action::Navigate(url) = link.activate() {
                        self.navigate(&url);
                    }
                }
            }
            Action::OpenSavedPlaylist => {
                if let Some(url) = self.saved_url() {
                    self.navigate(&url);
                }
            }
            Action::CopySavedPlaylist => {
                if let Some(url) = self.saved_url() {
                    self.apply_action(Action::CopyToClipboard(url));
                }
            }
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => {
                if id != ComponentId::SearchPanel && self.state.input_mode == InputMode::Insert {
                    self.state.input_mode = InputMode::Normal;
                    self.search_panel.input.deactivate();
                }
                self.focus.set(id);
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleLogs => {
                if self.log_panel.visible {
                    self.reload_tui_log();
                }
                self.sync_focus_ring();
            }
            Action::ToggleHelp => {}
            Action::DismissAlert => {
                if let Some(c) = self.state.container.as_mut() {
                    c.dismiss_alert();
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Reload => self.reload(),
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    // ── Effects ───────────────────────────────────────────────────────────────

    fn run_effect(&mut self, effect: Option<Effect>) {
        let (Some(effect), Some(tx)) = (effect, self.tx.clone()) else {
            return;
        };
        let api = self.api.clone();
        let (kind, handle) = match effect {
            Effect::Search { token, query, kind } => {
                let handle = tokio::spawn(async move {
                    let result = api.search(&query, kind).await;
                    let _ = tx.send(AppMessage::Searched(token, result)).await;
                });
                (RequestKind::Search, handle)
            }
            Effect::Recommend { token, request } => {
                self.toast.spinner("getting recommendations");
                let handle = tokio::spawn(async move {
                    let result = api.recommend(&request).await;
                    let _ = tx.send(AppMessage::Recommended(token, result)).await;
                });
                (RequestKind::Recommend, handle)
            }
            Effect::Save { token, uris } => {
                self.toast.spinner(format!("saving {} tracks", uris.len()));
                let handle = tokio::spawn(async move {
                    let result = api.save_playlist(&uris).await;
                    let _ = tx.send(AppMessage::Saved(token, result)).await;
                });
                (RequestKind::Save, handle)
            }
        };
        if let Some(previous) = self.in_flight.insert(kind, handle) {
            previous.abort();
        }
    }

    fn abort(&mut self, kind: RequestKind) {
        if let Some(handle) = self.in_flight.remove(&kind) {
            handle.abort();
            if matches!(kind, RequestKind::Recommend | RequestKind::Save) {
                self.toast.dismiss_spinner();
            }
        }
    }

    fn start_bootstrap(&mut self) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let api = self.api.clone();
        let config = self.state.config.clone();
        let handle = tokio::spawn(async move {
            let mount = bootstrap::bootstrap(&api, &config).await;
            let _ = tx.send(AppMessage::Mounted(mount)).await;
        });
        if let Some(previous) = self.in_flight.insert(RequestKind::Auth, handle) {
            previous.abort();
        }
    }

    /// Re-read settings, rebuild the client, and check the session again.
    fn reload(&mut self) {
        match Settings::load() {
            Ok(settings) => self.settings = settings,
            Err(e) => {
                error!("failed to reload settings: {:#}", e);
                self.toast.warning(format!("settings not reloaded: {}", e));
                return;
            }
        }
        let config = self.settings.apply(self.base_config.clone());
        let api = match ApiClient::new(
            &config,
            &self.settings.api,
            self.settings.session.cookie.as_deref(),
        ) {
            Ok(api) => api,
            Err(e) => {
                error!("failed to build API client: {}", e);
                self.toast.error(e.to_string());
                return;
            }
        };
        for kind in [RequestKind::Search, RequestKind::Recommend, RequestKind::Save] {
            self.abort(kind);
        }
        if let Some(c) = self.state.container.as_mut() {
            c.cancel_pending();
        }
        info!("reloaded settings, api {}", config.api_url);
        self.api = api;
        self.state.config = config;
        self.state.session = bootstrap::Session::Checking;
        self.toast.info("checking session…");
        self.start_bootstrap();
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn navigate(&mut self, url: &str) {
        info!("opening {}", url);
        if let Err(e) = open::that(url) {
            error!("failed to open {}: {}", url, e);
            self.toast.error(format!("could not open browser: {}", e));
        }
    }

    fn saved_url(&self) -> Option<String> {
        self.state
            .container()
            .and_then(|c| c.saved())
            .map(|s| s.url().to_string())
    }

    /// Panes reachable with 1-5, in layout order.
    fn focus_slots(&self) -> Vec<ComponentId> {
        if self.state.container().is_none() {
            return Vec::new();
        }
        vec![
            ComponentId::SearchPanel,
            ComponentId::ResultsList,
            ComponentId::SeedsPanel,
            ComponentId::TargetsPanel,
            ComponentId::PlaylistPanel,
        ]
    }

    fn sync_focus_ring(&mut self) {
        let mut items = self.focus_slots();
        if self.log_panel.visible {
            items.push(ComponentId::LogPanel);
        }
        self.focus.set_items(items);
        if self.state.container().is_none() {
            self.state.input_mode = InputMode::Normal;
            self.search_panel.input.deactivate();
            self.search_panel.input.set_value("");
        }
    }

    fn reload_tui_log(&mut self) {
        match std::fs::read_to_string(&self.state.tui_log_path) {
            Ok(content) => {
                let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
                let start = lines.len().saturating_sub(500);
                self.state.tui_log_lines = lines[start..].to_vec();
            }
            Err(e) => debug!("log file unreadable: {}", e),
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        use ratatui::widgets::Block;
        let area = frame.area();
        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: header | separator | body | (log) | status bar ────
        let log_h = if self.log_panel.visible {
            LOG_PANEL_HEIGHT
        } else {
            0
        };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(log_h),
                Constraint::Length(1),
            ])
            .split(area);

        self.pane_areas = PaneAreas {
            header: outer[0],
            log_panel: outer[3],
            ..PaneAreas::default()
        };

        self.header.draw(frame, outer[0], &self.state);
        status_bar::draw_separator(frame, outer[1]);

        if self.state.container().is_some() {
            self.draw_container(frame, outer[2]);
        } else {
            draw_landing(frame, outer[2], &self.state);
        }

        if self.log_panel.visible {
            let focused = self.focus.is_focused(ComponentId::LogPanel);
            self.log_panel.draw(frame, outer[3], focused, &self.state);
        }

        status_bar::draw_keys_bar(frame, outer[4], self.state.input_mode, self.state.session);

        self.help_overlay.draw(frame, area, false, &self.state);
        self.alert_overlay.draw(frame, area, true, &self.state);
        self.toast.draw(frame, area);
    }

    fn draw_container(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEEDS_PANEL_HEIGHT),
                Constraint::Length(TARGETS_PANEL_HEIGHT),
                Constraint::Min(3),
            ])
            .split(columns[1]);

        self.pane_areas.search = left[0];
        self.pane_areas.results = left[1];
        self.pane_areas.seeds = right[0];
        self.pane_areas.targets = right[1];
        self.pane_areas.playlist = right[2];

        let s = &self.state;
        let f = &self.focus;
        self.search_panel
            .draw(frame, left[0], f.is_focused(ComponentId::SearchPanel), s);
        self.results_list
            .draw(frame, left[1], f.is_focused(ComponentId::ResultsList), s);
        self.seeds_panel
            .draw(frame, right[0], f.is_focused(ComponentId::SeedsPanel), s);
        self.targets_panel
            .draw(frame, right[1], f.is_focused(ComponentId::TargetsPanel), s);
        self.playlist_panel
            .draw(frame, right[2], f.is_focused(ComponentId::PlaylistPanel), s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use seedlist_core::api::AuthStatus;
    use seedlist_core::config::ApiSettings;
    use seedlist_core::models::{ItemKind, SearchResultItem};

    fn app() -> App {
        let config = Config::resolve(false).unwrap();
        let api = ApiClient::new(&config, &ApiSettings::default(), None).unwrap();
        App::new(config, Settings::default(), api, PathBuf::from("/tmp/seedlist-test.log"))
    }

    fn mounted() -> App {
        let mut app = app();
        let config = app.state.config.clone();
        app.handle_message(AppMessage::Mounted(bootstrap::mount(
            &config,
            Ok(AuthStatus::Authenticated),
        )));
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        for a in app.handle_key(key(code)) {
            app.dispatch(a);
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn artist(id: &str, name: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Artist,
            artists: Vec::new(),
        }
    }

    #[test]
    fn test_anonymous_session_shows_login_link() {
        let mut app = app();
        let config = app.state.config.clone();
        app.handle_message(AppMessage::Mounted(bootstrap::mount(
            &config,
            Ok(AuthStatus::Unauthenticated(seedlist_core::api::StatusCode::UNAUTHORIZED)),
        )));
        assert!(app.state.container().is_none());
        let text = screen(&mut app);
        assert!(text.contains("[ Login with Spotify ]"));
        assert!(!text.contains("(•) artist"));
    }

    #[test]
    fn test_authenticated_session_mounts_panes() {
        let mut app = mounted();
        let text = screen(&mut app);
        assert!(text.contains("[ Logout ]"));
        assert!(text.contains("search"));
        assert!(text.contains("(•) artist"));
        assert!(text.contains("( ) track"));
        assert!(text.contains("seeds"));
        assert!(text.contains("targets"));
    }

    #[test]
    fn test_typing_mirrors_query_and_esc_clears_results() {
        let mut app = mounted();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state.input_mode, InputMode::Insert);
        for c in "daft".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.state.container().unwrap().query(), "daft");

        // A result arrives for the current search.
        let c = app.state.container.as_mut().unwrap();
        let token = c.submit_search().unwrap().token();
        c.apply_search(token, Ok(vec![artist("X1", "Daft Punk")]));
        assert_eq!(app.state.container().unwrap().results().len(), 1);

        press(&mut app, KeyCode::Esc);
        assert!(app.state.container().unwrap().results().is_empty());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_enter_on_result_adds_seed_once() {
        let mut app = mounted();
        let c = app.state.container.as_mut().unwrap();
        c.set_query("Daft Punk");
        let token = c.submit_search().unwrap().token();
        c.apply_search(token, Ok(vec![artist("X1", "Daft Punk")]));

        app.dispatch(Action::FocusPane(ComponentId::ResultsList));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        let seeds = app.state.container().unwrap().seeds();
        assert_eq!(seeds.list(ItemKind::Artist).len(), 1);
        assert!(app.state.container().unwrap().get_playlist_enabled());
    }

    #[test]
    fn test_alert_blocks_input_until_dismissed() {
        let mut app = mounted();
        let c = app.state.container.as_mut().unwrap();
        c.set_query("a");
        let token = c.submit_search().unwrap().token();
        let items = (1..=6)
            .map(|i| artist(&format!("A{}", i), &format!("Artist {}", i)))
            .collect();
        c.apply_search(token, Ok(items));
        for i in 0..6 {
            app.dispatch(Action::AddSeed(i));
        }
        assert_eq!(app.state.alert(), Some("Max of 5 items per seed"));
        assert!(screen(&mut app).contains("Max of 5 items per seed"));

        // `q` does not quit while the alert is up.
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.alert(), None);
        assert_eq!(
            app.state.container().unwrap().seeds().list(ItemKind::Artist).len(),
            5
        );
    }

    #[test]
    fn test_get_playlist_without_seeds_does_nothing() {
        let mut app = mounted();
        press(&mut app, KeyCode::Char('g'));
        assert!(app.in_flight.is_empty());
        assert!(!app
            .state
            .container()
            .unwrap()
            .is_pending(RequestKind::Recommend));
    }

    #[test]
    fn test_focus_keys() {
        let mut app = mounted();
        press(&mut app, KeyCode::Char('4'));
        assert!(app.focus.is_focused(ComponentId::TargetsPanel));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state.container().unwrap().targets().danceability, 55);
        press(&mut app, KeyCode::Tab);
        assert!(app.focus.is_focused(ComponentId::PlaylistPanel));
    }
}
