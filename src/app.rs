// App state and main event loop.
// Owns the board state, dispatches fetches to tokio tasks, and handles keys.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, Country, Fetched, Internship};
use crate::browser;
use crate::cache::CacheStore;
use crate::error::Result;
use crate::state::{
    BoardState, CountriesPlan, CountryPicker, Field, FormState, SearchPlan, SearchRequest,
};
use crate::ui;

/// Completed background work, delivered to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    Countries(Result<Fetched<Country>>),
    Internships {
        request: SearchRequest,
        result: Result<Fetched<Internship>>,
    },
}

/// Main application state.
pub struct App {
    /// Countries, results, filter, loading and error state.
    pub board: BoardState,
    /// Focus, dropdown, and card selection.
    pub form: FormState,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Transient status line message.
    pub status_message: Option<String>,
    /// Whether the app should exit.
    pub should_quit: bool,
    api: ApiClient,
    cache: CacheStore,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(api: ApiClient, cache: CacheStore) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            board: BoardState::new(),
            form: FormState::new(),
            show_help: false,
            status_message: None,
            should_quit: false,
            api,
            cache,
            events_tx,
            events_rx,
        }
    }

    /// Load reference data and run the initial search.
    /// Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        self.load_countries();
        self.search();
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.start();
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
            self.drain_app_events();
        }
        Ok(())
    }

    /// Populate countries from cache, or fetch them in the background.
    fn load_countries(&mut self) {
        if self.board.load_cached_countries(&self.cache) == CountriesPlan::Cached {
            return;
        }

        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.get_countries().await;
            // Receiver is gone only when the app has exited
            let _ = tx.send(AppEvent::Countries(result));
        });
    }

    /// Run a search with the current filter. Ignored while one is in progress.
    pub fn search(&mut self) {
        if !self.board.can_search() {
            debug!("search ignored while loading");
            return;
        }

        match self.board.begin_search(&self.cache) {
            SearchPlan::Cached => self.form.clamp_selection(self.board.internships.len()),
            SearchPlan::Fetch(request) => {
                info!(key = %request.cache_key, generation = request.generation, "searching");
                let api = self.api.clone();
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = api.get_internships(&request.filter).await;
                    let _ = tx.send(AppEvent::Internships { request, result });
                });
            }
        }
    }

    /// Apply a completed fetch to the board.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Countries(result) => self.board.apply_countries(&self.cache, result),
            AppEvent::Internships { request, result } => {
                if self.board.finish_search(&self.cache, request, result) {
                    self.form.clamp_selection(self.board.internships.len());
                }
            }
        }
    }

    /// Apply every fetch that has completed since the last frame.
    fn drain_app_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Dispatch a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.form.picker.is_some() {
            self.handle_picker_key(key);
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.form.focus = self.form.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.form.focus = self.form.focus.prev();
                return;
            }
            _ => {}
        }

        if self.form.focus.is_text_input() {
            match key.code {
                KeyCode::Char(c)
                    if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.form.insert_char(&mut self.board.filter, c)
                }
                KeyCode::Backspace => self.form.delete_char(&mut self.board.filter),
                KeyCode::Enter => self.search(),
                KeyCode::Esc => self.form.focus = Field::Search,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') => self.form.focus = Field::Discipline,
            _ => match self.form.focus {
                Field::Country => self.handle_country_key(key),
                Field::Search => self.handle_search_key(key),
                Field::Results => self.handle_results_key(key),
                Field::State | Field::Discipline => {}
            },
        }
    }

    fn handle_country_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                let names = self.country_names();
                self.form.picker = Some(CountryPicker::open(&names, &self.board.filter.country));
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.search(),
            KeyCode::Down => self.form.focus = Field::Results,
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        let count = self.board.internships.len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.form.move_selection(count, -1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.form.move_selection(count, 1, 0),
            KeyCode::Up | KeyCode::Char('k') => {
                // Leave the grid from its first row
                if self.form.selected_card.unwrap_or(0) < self.form.grid_columns.max(1) {
                    self.form.focus = Field::Search;
                } else {
                    self.form.move_selection(count, 0, -1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.form.move_selection(count, 0, 1),
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            KeyCode::Esc => self.form.focus = Field::Search,
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let names = self.country_names();
        let Some(picker) = self.form.picker.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => picker.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => picker.select_next(names.len() + 1),
            KeyCode::Enter => {
                self.board.filter.country = picker.chosen(&names).to_string();
                self.form.picker = None;
            }
            KeyCode::Esc => self.form.picker = None,
            _ => {}
        }
    }

    /// The posting under the card selection.
    fn selected_internship(&self) -> Option<&Internship> {
        self.form
            .selected_card
            .and_then(|i| self.board.internships.get(i))
    }

    /// Open the selected card's first related link.
    fn open_selected(&mut self) {
        let Some(internship) = self.selected_internship() else {
            return;
        };
        let Some(link) = internship.primary_link().map(str::to_string) else {
            warn!(title = %internship.title, "posting has no related links");
            self.status_message = Some("This posting has no link".to_string());
            return;
        };

        match browser::open_url(&link) {
            Ok(()) => {
                info!(%link, "opened posting");
                self.status_message = Some(format!("Opened {}", link));
            }
            Err(e) => {
                warn!(%link, error = %e, "failed to open posting");
                self.status_message = Some(format!("Could not open link: {}", e));
            }
        }
    }

    /// Country names in dropdown order.
    pub fn country_names(&self) -> Vec<String> {
        self.board.countries.iter().map(|c| c.name.clone()).collect()
    }
}
