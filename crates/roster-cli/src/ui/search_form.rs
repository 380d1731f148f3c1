//! Search form — name, position and nationality fields.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::{App, Focus},
  flag,
};

/// Rows shown by the nationality picker.
const PICKER_ROWS: u16 = 8;

/// Render the three form fields side by side into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = field_columns(area);

  let name = if app.focus == Focus::Name {
    format!("{}_", app.fields.name)
  } else {
    app.fields.name.clone()
  };
  draw_field(f, cols[0], " Name ", name, app.focus == Focus::Name);

  let position = app
    .fields
    .position
    .map(|p| p.to_string())
    .unwrap_or_else(|| "Any".to_string());
  let position = if app.focus == Focus::Position {
    format!("‹ {position} ›")
  } else {
    position
  };
  draw_field(f, cols[1], " Position ", position, app.focus == Focus::Position);

  let nationality = if app.focus == Focus::Nationality {
    format!("{}_", app.nationality_query)
  } else {
    app
      .fields
      .nationality
      .as_ref()
      .map(|c| c.countryname.clone())
      .unwrap_or_else(|| "Any".to_string())
  };
  draw_field(
    f,
    cols[2],
    " Nationality ",
    nationality,
    app.focus == Focus::Nationality,
  );
}

/// Render the nationality matches under the nationality field, over `body`.
pub fn draw_nationality_popup(f: &mut Frame, form: Rect, body: Rect, app: &App) {
  let column = field_columns(form)[2];
  let area = Rect {
    x:      column.x,
    y:      body.y,
    width:  column.width,
    height: body.height.min(PICKER_ROWS + 2),
  };

  let matches = app.nationality_matches();
  let items: Vec<ListItem> = matches
    .iter()
    .map(|c| {
      let flag = flag::flag_for(&c.countryname);
      ListItem::new(Line::from(vec![
        Span::raw(if flag.is_empty() { String::new() } else { format!("{flag} ") }),
        Span::raw(c.countryname.clone()),
      ]))
    })
    .collect();

  let block = Block::default()
    .title(format!(" {} matches ", matches.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  let mut state = ListState::default();
  state.select(if matches.is_empty() || app.nationality_query.is_empty() {
    None
  } else {
    Some(app.nationality_cursor.min(matches.len() - 1))
  });

  f.render_widget(Clear, area);
  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    area,
    &mut state,
  );
}

fn field_columns(area: Rect) -> std::rc::Rc<[Rect]> {
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage(40),
      Constraint::Percentage(25),
      Constraint::Percentage(35),
    ])
    .split(area)
}

fn draw_field(f: &mut Frame, area: Rect, title: &str, value: String, focused: bool) {
  let border = if focused {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border);
  f.render_widget(Paragraph::new(value).block(block), area);
}
