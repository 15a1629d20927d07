use ratatui::{
  layout::{ Alignment, Constraint, Direction, Layout, Rect },
  style::{ Color, Modifier, Style },
  text::{ Line, Text },
  widgets::{ Block, Paragraph },
  Frame,
};

use carthing::{ BackgroundColor, Icon, PanelIcons, PlaybackState };

use crate::widget::util::vertically_centered_layout;

/// Everything the panel shows for one frame
pub struct Panel<'a> {
  pub state: &'a PlaybackState,
  pub icons: &'a PanelIcons,
  pub background: BackgroundColor,
  pub status: Option<&'a str>,
}

/// Key hints, in the same order as `PanelIcons::in_order`
const KEY_HINTS: [&str; 6] = ["p", "space", "n", "l", "r", "s"];

pub fn draw(frame: &mut Frame, panel: &Panel) {
  let area = frame.area();
  let [r, g, b] = panel.background.to_rgb8();
  let base = Style::default().bg(Color::Rgb(r, g, b)).fg(Color::White);
  frame.render_widget(Block::default().style(base), area);

  let outer = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1)])
    .split(area);

  let inner_layout = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),
      Constraint::Length(1),
      Constraint::Length(1),
      Constraint::Length(2),
    ]);
  let sections = vertically_centered_layout(outer[0], inner_layout);

  let title = panel.state.title.as_deref().unwrap_or("Nothing playing");
  let title_paragraph = Paragraph::new(Text::from(title))
    .style(base.add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
  frame.render_widget(title_paragraph, sections[0]);

  if let Some(artist) = panel.state.artist.as_deref() {
    let artist_paragraph = Paragraph::new(Text::from(artist)).style(base).alignment(Alignment::Center);
    frame.render_widget(artist_paragraph, sections[1]);
  }

  draw_buttons(frame, sections[3], panel.icons, base);

  if let Some(status) = panel.status {
    let status_paragraph = Paragraph::new(Text::from(status))
      .style(base.add_modifier(Modifier::ITALIC))
      .alignment(Alignment::Center);
    frame.render_widget(status_paragraph, outer[1]);
  }
}

fn draw_buttons(frame: &mut Frame, area: Rect, icons: &PanelIcons, style: Style) {
  let columns = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 6); 6])
    .split(area);

  for ((icon, hint), column) in icons.in_order().iter().zip(KEY_HINTS).zip(columns.iter()) {
    let button = Text::from(vec![
      Line::from(icon.glyph()),
      Line::from(hint).style(style.add_modifier(Modifier::DIM)),
    ]);
    let button_style = if is_active(*icon) { style.add_modifier(Modifier::BOLD) } else { style };
    frame.render_widget(Paragraph::new(button).style(button_style).alignment(Alignment::Center), *column);
  }
}

/// Toggles that are currently "on" are highlighted
fn is_active(icon: Icon) -> bool {
  matches!(icon, Icon::Liked | Icon::Shuffle | Icon::ArrowsRepeatAll | Icon::ArrowsRepeat1)
}
