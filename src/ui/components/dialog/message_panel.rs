//! Full-size message panel used in place of a form body

use super::base::wrap_text;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Bordered panel with a centered message and an optional focused action button
pub fn render_message_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    color: Color,
    action: Option<&str>,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let wrapped = wrap_text(message, inner.width.saturating_sub(4) as usize);
    let message_height = wrapped.len() as u16;
    let action_height = if action.is_some() { BUTTON_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                 // Top padding (flex)
            Constraint::Length(message_height), // Message
            Constraint::Length(1),              // Gap
            Constraint::Length(action_height),  // Action button
            Constraint::Min(0),                 // Bottom padding (flex)
        ])
        .split(inner);

    let lines: Vec<Line> = wrapped.into_iter().map(Line::from).collect();
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color)),
        chunks[1],
    );

    if let Some(label) = action {
        let button_width = (label.chars().count() as u16 + 6).min(chunks[3].width);
        let button_area = Rect {
            x: chunks[3].x + (chunks[3].width - button_width) / 2,
            width: button_width,
            ..chunks[3]
        };
        render_button(frame, button_area, label, true, true);
    }
}
