//! Application state and key dispatcher.
//!
//! All paging and filter decisions are delegated to
//! [`PageFetchController`]. Requests it issues run on spawned tasks; their
//! outcomes come back over `outcomes` and are applied by the event loop.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use roster_core::{
  PageFetchController,
  fetch::{self, FetchOutcome, FetchRequest},
  player::{Country, Position},
  query::FilterFields,
  source::PlayerSource,
};
use strum::IntoEnumIterator;
use tokio::sync::mpsc::UnboundedSender;

use crate::client::ApiClient;

// ─── Focus ────────────────────────────────────────────────────────────────────

/// Which widget receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// The player table and pagination controls.
  Table,
  /// Name input of the search form.
  Name,
  /// Position selector of the search form.
  Position,
  /// Nationality picker of the search form.
  Nationality,
  /// Page-number input of the pagination bar.
  PageInput,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub focus: Focus,

  /// Uncommitted search form values.
  pub fields: FilterFields,

  /// Paging, filter and fetch state.
  pub controller: PageFetchController,

  /// Countries available to the nationality picker.
  pub countries: Vec<Country>,

  /// Text typed into the nationality picker.
  pub nationality_query: String,

  /// Cursor within the picker's current matches.
  pub nationality_cursor: usize,

  /// Highlighted row of the current page.
  pub row_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  client:   Arc<ApiClient>,
  outcomes: UnboundedSender<FetchOutcome>,
}

impl App {
  pub fn new(
    client: ApiClient,
    page_size: u32,
    outcomes: UnboundedSender<FetchOutcome>,
  ) -> roster_core::Result<Self> {
    Ok(Self {
      focus: Focus::Table,
      fields: FilterFields::default(),
      controller: PageFetchController::new(page_size)?,
      countries: Vec::new(),
      nationality_query: String::new(),
      nationality_cursor: 0,
      row_cursor: 0,
      status_msg: String::new(),
      client: Arc::new(client),
      outcomes,
    })
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Populate the nationality picker. Failure leaves it empty.
  pub async fn load_countries(&mut self) {
    match self.client.countries().await {
      Ok(countries) => self.countries = countries,
      Err(e) => {
        tracing::warn!(error = %e, "loading countries failed");
        self.status_msg = "Nationalities unavailable.".into();
      }
    }
  }

  /// Issue the initial fetch.
  pub fn mount(&mut self) {
    let request = self.controller.mount();
    self.dispatch(request);
  }

  /// Run `request` in the background; its outcome arrives on the channel.
  fn dispatch(&self, request: Option<FetchRequest>) {
    let Some(request) = request else {
      return;
    };
    let client = Arc::clone(&self.client);
    let outcomes = self.outcomes.clone();
    tokio::spawn(async move {
      let outcome = fetch::execute(client.as_ref(), request).await;
      // The receiver only goes away on shutdown.
      let _ = outcomes.send(outcome);
    });
  }

  /// Apply a finished fetch to the controller.
  pub fn apply(&mut self, outcome: FetchOutcome) {
    if self.controller.apply(outcome) {
      let len = self.controller.items().len();
      self.row_cursor = self.row_cursor.min(len.saturating_sub(1));
    }
  }

  // ── Nationality picker ────────────────────────────────────────────────────

  /// Countries matching the picker text, best match first.
  pub fn nationality_matches(&self) -> Vec<&Country> {
    if self.nationality_query.is_empty() {
      return self.countries.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &Country)> = self
      .countries
      .iter()
      .filter_map(|c| {
        matcher
          .fuzzy_match(&c.countryname, &self.nationality_query)
          .map(|score| (score, c))
      })
      .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, c)| c).collect()
  }

  /// Re-derive the selected nationality from the picker state.
  fn select_nationality(&mut self) {
    if self.nationality_query.is_empty() {
      self.fields.nationality = None;
      self.nationality_cursor = 0;
      return;
    }
    let matches = self.nationality_matches();
    if matches.is_empty() {
      self.fields.nationality = None;
      self.nationality_cursor = 0;
      return;
    }
    let cursor = self.nationality_cursor.min(matches.len() - 1);
    let selected = matches[cursor].clone();
    self.nationality_cursor = cursor;
    self.fields.nationality = Some(selected);
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.focus {
      Focus::Table => return self.handle_table_key(key),
      Focus::Name | Focus::Position | Focus::Nationality => self.handle_form_key(key),
      Focus::PageInput => self.handle_page_input_key(key),
    }
    true
  }

  fn handle_table_key(&mut self, key: KeyEvent) -> bool {
    let paging = !self.controller.is_loading();
    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Rows
      KeyCode::Down | KeyCode::Char('j') => {
        if self.row_cursor + 1 < self.controller.items().len() {
          self.row_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.row_cursor = self.row_cursor.saturating_sub(1);
      }

      // Pages
      KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') if paging => {
        let request = self.controller.next_page();
        if request.is_some() {
          self.row_cursor = 0;
        }
        self.dispatch(request);
      }
      KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') if paging => {
        let request = self.controller.previous_page();
        if request.is_some() {
          self.row_cursor = 0;
        }
        self.dispatch(request);
      }
      KeyCode::Char('g') | KeyCode::Char(':') if paging => {
        self.focus = Focus::PageInput;
      }

      // Search form
      KeyCode::Char('/') => self.focus = Focus::Name,
      KeyCode::Char('c') => self.clear(),

      _ => {}
    }
    true
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Enter => {
        self.submit();
        return;
      }
      KeyCode::Esc => {
        self.focus = Focus::Table;
        return;
      }
      KeyCode::Tab => {
        self.focus = match self.focus {
          Focus::Name => Focus::Position,
          Focus::Position => Focus::Nationality,
          _ => Focus::Name,
        };
        return;
      }
      KeyCode::BackTab => {
        self.focus = match self.focus {
          Focus::Nationality => Focus::Position,
          Focus::Position => Focus::Name,
          _ => Focus::Nationality,
        };
        return;
      }
      _ => {}
    }

    match self.focus {
      Focus::Name => match key.code {
        KeyCode::Char(c) => self.fields.name.push(c),
        KeyCode::Backspace => {
          self.fields.name.pop();
        }
        _ => {}
      },
      Focus::Position => match key.code {
        KeyCode::Right | KeyCode::Char(' ') => {
          self.fields.position = cycle_position(self.fields.position, true);
        }
        KeyCode::Left => {
          self.fields.position = cycle_position(self.fields.position, false);
        }
        KeyCode::Backspace | KeyCode::Delete => self.fields.position = None,
        _ => {}
      },
      Focus::Nationality => {
        match key.code {
          KeyCode::Char(c) => {
            self.nationality_query.push(c);
            self.nationality_cursor = 0;
          }
          KeyCode::Backspace => {
            self.nationality_query.pop();
            self.nationality_cursor = 0;
          }
          KeyCode::Delete => self.nationality_query.clear(),
          KeyCode::Down => self.nationality_cursor += 1,
          KeyCode::Up => self.nationality_cursor = self.nationality_cursor.saturating_sub(1),
          _ => return,
        }
        self.select_nationality();
      }
      Focus::Table | Focus::PageInput => {}
    }
  }

  fn handle_page_input_key(&mut self, key: KeyEvent) {
    match key.code {
      // Enter and leaving the field both commit.
      KeyCode::Enter | KeyCode::Tab => {
        let request = self.controller.commit_page_input();
        if request.is_some() {
          self.row_cursor = 0;
        }
        self.dispatch(request);
        self.focus = Focus::Table;
      }
      KeyCode::Esc => {
        self.controller.revert_page_input();
        self.focus = Focus::Table;
      }
      KeyCode::Backspace => self.controller.page_input_mut().pop(),
      KeyCode::Char(c) => self.controller.page_input_mut().push(c),
      _ => {}
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  /// Commit the form as the active filter.
  fn submit(&mut self) {
    let request = self.controller.submit(&self.fields);
    self.row_cursor = 0;
    self.focus = Focus::Table;
    self.dispatch(request);
  }

  /// Reset the form and drop the active filter.
  fn clear(&mut self) {
    let request = self.controller.clear(&mut self.fields);
    self.nationality_query.clear();
    self.nationality_cursor = 0;
    self.row_cursor = 0;
    self.dispatch(request);
  }
}

/// Step through `None → GK → MID → DEF → FWD → None`.
fn cycle_position(current: Option<Position>, forward: bool) -> Option<Position> {
  let mut ring: Vec<Option<Position>> = std::iter::once(None)
    .chain(Position::iter().map(Some))
    .collect();
  if !forward {
    ring.reverse();
  }
  let at = ring.iter().position(|p| *p == current).unwrap_or(0);
  ring[(at + 1) % ring.len()]
}
