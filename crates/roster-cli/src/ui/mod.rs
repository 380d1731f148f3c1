//! TUI rendering — orchestrates all panes.

pub mod player_table;
pub mod search_form;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Focus};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, search form, table, pagination, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(3), // search form
      Constraint::Min(0),    // table
      Constraint::Length(1), // pagination
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  search_form::draw(f, rows[1], app);
  player_table::draw(f, rows[2], app);
  player_table::draw_pagination(f, rows[3], app);
  draw_status(f, rows[4], app);

  // The picker overlays the table while the nationality field is focused.
  if app.focus == Focus::Nationality {
    search_form::draw_nationality_popup(f, rows[1], rows[2], app);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " roster  [/] search  [c] clear  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.focus {
    Focus::Table => (
      "BROWSE",
      "↑↓/jk rows  ←→/np page  g go to page  / search  c clear  q quit",
    ),
    Focus::Name => ("SEARCH", "Type a name  Tab next field  Enter search  Esc back"),
    Focus::Position => ("SEARCH", "←→/Space choose position  Tab next field  Enter search"),
    Focus::Nationality => (
      "SEARCH",
      "Type to filter  ↑↓ choose  Del clear  Enter search  Esc back",
    ),
    Focus::PageInput => ("PAGE", "Type a page number  Enter go  Esc cancel"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
