//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Searches never block the
//! loop: they are handed to a [`SearchDispatcher`] and their outcomes are
//! drained once per tick.

use crate::{
    commands::Command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        facet_pane::{FacetPane, FacetPaneState, FacetPick},
        header::Header,
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        result_list::{ResultList, ResultListState},
        status_line::StatusLine,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use sift_client::SearchDispatcher;
use sift_core::{config::Config, Completion, SearchBackend, SearchSession, SearchState};
use std::{io, time::Duration};
use tokio::runtime::Handle;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Facets,
    Results,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub session: SearchSession,
    pub query: QueryBarState,
    pub facets: FacetPaneState,
    pub results: ResultListState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let theme = Theme::by_name(&config.ui.theme);
        let session = SearchSession::new(SearchState::new(config.search.default_sort.clone()));
        Self {
            session,
            query: QueryBarState::default(),
            facets: FacetPaneState::default(),
            results: ResultListState::default(),
            focus: Focus::QueryBar,
            prev_focus: Focus::QueryBar,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    pub fn search_state(&self) -> &SearchState {
        self.session.state()
    }

    /// Handle one event. Returns `true` when a new search should be issued.
    ///
    /// Every search goes out with the text currently in the query bar,
    /// whichever key triggered it.
    pub fn handle(&mut self, event: AppEvent) -> bool {
        let search = self.route(event);
        if search {
            self.session.state_mut().query_text = self.query.query.clone();
        }
        search
    }

    fn route(&mut self, event: AppEvent) -> bool {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return false;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            if event == AppEvent::Escape {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
                return false;
            }
            let Some(input) = self.command_bar.handle(&event) else {
                return false;
            };
            return match Command::parse(&input) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    self.execute_command(cmd)
                }
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    false
                }
                Err(msg) => {
                    // Show the error; bar stays open
                    self.command_bar.error = Some(msg);
                    false
                }
            };
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                self.show_help = true;
                false
            }

            AppEvent::Char(':') if self.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
                false
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
                false
            }

            AppEvent::Escape => {
                if self.focus == Focus::QueryBar {
                    tracing::debug!("focus: QueryBar -> Results");
                    self.focus = Focus::Results;
                }
                false
            }

            // Tab-cycle focus: Facets → Results → QueryBar → Facets
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Facets => Focus::Results,
                    Focus::Results => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::Facets,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
                false
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                self.focus = Focus::QueryBar;
                false
            }

            AppEvent::CycleSort => self.cycle_sort(),
            AppEvent::Refresh => true,
            AppEvent::ClearFacets => {
                self.session.state_mut().facets.clear_all();
                true
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => false,

            other => self.dispatch_to_focused(other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) -> bool {
        match self.focus {
            Focus::Facets => match self.facets.handle(&event) {
                Some(pick) => {
                    self.toggle_facet(pick);
                    true
                }
                None => false,
            },
            Focus::Results => {
                let total = self.session.state().results.len();
                self.results.handle(&event, total);
                false
            }
            Focus::QueryBar => {
                if event == AppEvent::Enter {
                    return self.submit_query();
                }
                self.query.handle(&event);
                false
            }
            Focus::Command => false, // handled before dispatch
        }
    }

    /// Ignored while a search is in flight.
    fn submit_query(&mut self) -> bool {
        if self.session.state().is_loading {
            tracing::debug!("submit ignored while loading");
            return false;
        }
        true
    }

    /// Picking the selected value again clears that facet.
    fn toggle_facet(&mut self, pick: FacetPick) {
        let facets = &mut self.session.state_mut().facets;
        if facets.get(pick.facet) == pick.value {
            facets.clear(pick.facet);
        } else {
            facets.set(pick.facet, pick.value);
        }
    }

    fn cycle_sort(&mut self) -> bool {
        let options = &self.config.search.sort_options;
        if options.is_empty() {
            return false;
        }
        let current = &self.session.state().sort_key;
        let next = options
            .iter()
            .position(|o| o == current)
            .map(|i| (i + 1) % options.len())
            .unwrap_or(0);
        let key = options[next].clone();
        tracing::debug!(sort = %key, "sort cycled");
        self.session.state_mut().sort_key = key;
        true
    }

    /// Execute a parsed [`Command`]. Returns `true` when it needs a search.
    fn execute_command(&mut self, cmd: Command) -> bool {
        let search = cmd.triggers_search();
        match cmd {
            Command::Quit => self.quit = true,
            Command::Help => self.show_help = !self.show_help,
            Command::Theme(name) => self.theme = Theme::by_name(&name),
            Command::SetFacet(facet, value) => self.session.state_mut().facets.set(facet, value),
            Command::Clear(Some(facet)) => self.session.state_mut().facets.clear(facet),
            Command::Clear(None) => self.session.state_mut().facets.clear_all(),
            Command::Sort(key) => self.session.state_mut().sort_key = key,
            Command::Search => {}
        }
        search
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<B> {
    state: AppState,
    dispatcher: SearchDispatcher<B>,
}

impl<B: SearchBackend + 'static> App<B> {
    pub fn new(config: Config, backend: B, runtime: Handle) -> Self {
        App {
            state: AppState::new(config),
            dispatcher: SearchDispatcher::new(backend, runtime),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The automatic search at session start, run with the default inputs so
    /// the screen is never blank.
    pub fn start(&mut self) {
        tracing::info!(collection = %self.state.config.search.collection, "initial search");
        self.search();
    }

    /// Issue a search from the current inputs.
    pub fn search(&mut self) {
        let (ticket, request) = self.state.session.begin();
        self.dispatcher.dispatch(ticket, request);
    }

    /// Apply every search outcome that has arrived since the last tick.
    pub fn tick(&mut self) {
        for outcome in self.dispatcher.drain() {
            let succeeded = outcome.result.is_ok();
            if self.state.session.apply(outcome) == Completion::Applied && succeeded {
                let counts = self.state.session.state().facet_counts.clone();
                self.state.facets.update_counts(&counts);
                self.state.results.reset();
            }
        }
    }

    fn handle(&mut self, event: AppEvent) {
        if self.state.handle(event) {
            self.search();
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.start();
        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.tick();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let search = state.search_state();

    // Vertical: header | body | status line | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let pct = state.config.ui.facet_pane_width_pct.min(100);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    frame.render_widget(
        Header::new(&state.config.search.collection, search.is_loading, &state.theme),
        vert[0],
    );
    frame.render_widget(
        FacetPane::new(&state.facets, &search.facets, state.focus == Focus::Facets, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        ResultList::new(
            &state.results,
            &search.results,
            search.is_loading,
            state.focus == Focus::Results,
            &state.theme,
        ),
        horiz[1],
    );
    frame.render_widget(StatusLine::new(search, &state.theme), vert[2]);
    frame.render_widget(
        QueryBar::new(&state.query, state.focus == Focus::QueryBar, search.is_loading, &state.theme),
        vert[3],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, true, search.is_loading, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[3]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
