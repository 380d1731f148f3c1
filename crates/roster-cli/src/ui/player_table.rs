//! Player table and pagination bar.

use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use roster_core::fetch::FetchError;

use crate::{
  app::{App, Focus},
  flag,
};

/// Render the current page of players into `area`.
///
/// Rows from the last successful fetch stay visible while a new page loads
/// or after a failure; the message replaces them only when there are none.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let view = app.controller.view();

  let title = format!(" Players · page {} ", app.controller.page());
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if view.items.is_empty() {
    let (text, style) = if view.loading {
      ("Loading players...", Style::default().fg(Color::DarkGray))
    } else if let Some(error) = view.error {
      (error_text(error), Style::default().fg(Color::Red))
    } else {
      ("No players found.", Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(text).style(style).block(block), area);
    return;
  }

  let header = Row::new(["Name", "Team", "Position", "Nationality", "Age"]).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let rows: Vec<Row> = view
    .items
    .iter()
    .map(|p| {
      let nationality = match p.nationality.as_deref() {
        Some(name) => {
          let flag = flag::flag_for(name);
          if flag.is_empty() { name.to_string() } else { format!("{flag} {name}") }
        }
        None => "—".to_string(),
      };
      Row::new([
        Cell::from(p.playername.clone()),
        Cell::from(p.teamname.clone().unwrap_or_else(|| "—".to_string())),
        Cell::from(p.position.clone()),
        Cell::from(nationality),
        Cell::from(p.age.map(|a| a.to_string()).unwrap_or_default()),
      ])
    })
    .collect();

  let widths = [
    Constraint::Percentage(30),
    Constraint::Percentage(25),
    Constraint::Length(9),
    Constraint::Percentage(25),
    Constraint::Length(4),
  ];

  // Dim stale rows while the next page is on its way.
  let body_style = if view.loading {
    Style::default().fg(Color::DarkGray)
  } else {
    Style::default()
  };

  let mut state = TableState::default();
  state.select(Some(app.row_cursor.min(view.items.len() - 1)));

  f.render_stateful_widget(
    Table::new(rows, widths)
      .header(header)
      .block(block)
      .style(body_style)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    area,
    &mut state,
  );
}

/// Render `‹ Prev  Page [n]  Next ›` plus the loading or error message.
pub fn draw_pagination(f: &mut Frame, area: Rect, app: &App) {
  let controller = &app.controller;
  let view = controller.view();
  let paging = !view.loading;

  let enabled = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
  let disabled = Style::default().fg(Color::DarkGray);

  let prev_style = if paging && controller.can_go_previous() { enabled } else { disabled };
  let next_style = if paging && controller.can_go_next() { enabled } else { disabled };

  let page_text = if app.focus == Focus::PageInput {
    format!("[{}_]", controller.page_input())
  } else {
    format!("[{}]", controller.page_input())
  };
  let page_style = if app.focus == Focus::PageInput {
    Style::default().fg(Color::Yellow)
  } else if paging {
    Style::default().fg(Color::White)
  } else {
    disabled
  };

  let mut spans = vec![
    Span::styled("‹ Prev", prev_style),
    Span::raw("   Page "),
    Span::styled(page_text, page_style),
    Span::raw("   "),
    Span::styled("Next ›", next_style),
  ];

  if view.loading {
    spans.push(Span::styled("   Loading players...", Style::default().fg(Color::DarkGray)));
  } else if let Some(error) = view.error {
    spans.push(Span::styled(
      format!("   {}", error_text(error)),
      Style::default().fg(Color::Red),
    ));
  }

  f.render_widget(
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
    area,
  );
}

fn error_text(error: FetchError) -> &'static str {
  match error {
    FetchError::FetchFailed => "Error fetching players.",
  }
}
