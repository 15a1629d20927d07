use std::rc::Rc;

use ratatui::layout::{ Constraint, Direction, Layout, Rect };

/// Splits `area` so the fixed-height `layout` sits in its vertical middle
pub fn vertically_centered_layout(area: Rect, layout: Layout) -> Rc<[Rect]> {
  let offset = get_height_of_layout(&layout).min(area.height);
  let padding = (area.height - offset) / 2;

  let outer_layout = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(padding),
      Constraint::Length(offset),
      Constraint::Min(0),
    ])
    .split(area);

  layout.split(outer_layout[1])
}

fn get_height_of_layout(layout: &Layout) -> u16 {
  let dummy_rect = Rect::new(0, 0, 0, u16::MAX);
  layout.split(dummy_rect).iter().map(|section| section.height).sum()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sections_are_centered() {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(2), Constraint::Length(4)]);

    let sections = vertically_centered_layout(Rect::new(0, 0, 40, 20), layout);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0], Rect::new(0, 7, 40, 2));
    assert_eq!(sections[1], Rect::new(0, 9, 40, 4));
  }

  #[test]
  fn test_layout_taller_than_area() {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(30)]);

    let sections = vertically_centered_layout(Rect::new(0, 0, 10, 5), layout);

    assert_eq!(sections[0].y, 0);
    assert!(sections[0].height <= 5);
  }
}
