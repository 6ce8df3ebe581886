//! Landing view shown when no registration modal is open

use crate::app::App;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const REGISTER_LABEL: &str = "Register (r)";

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Top padding (flex)
            Constraint::Length(2),             // Title
            Constraint::Length(1),             // Form reference
            Constraint::Length(1),             // Gap
            Constraint::Length(BUTTON_HEIGHT), // Register button
            Constraint::Min(0),                // Bottom padding (flex)
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        app.state.settings.site_name(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    let target = app.target();
    let reference = Paragraph::new(Span::styled(
        format!("Form {}", target.form_id),
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(reference, chunks[2]);

    let button_width = (REGISTER_LABEL.len() as u16 + 6).min(chunks[4].width);
    let button_area = Rect {
        x: chunks[4].x + (chunks[4].width - button_width) / 2,
        width: button_width,
        ..chunks[4]
    };
    render_button(frame, button_area, REGISTER_LABEL, true, true);
}
