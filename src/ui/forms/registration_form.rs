//! Registration modal rendering

use super::field_renderer::{draw_field, field_height, first_visible, FieldView};
use crate::state::{FocusTarget, FormPhase, RegistrationForm, SiteSettings};
use crate::ui::components::{centered_rect, render_button, render_message_panel, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SUBMITTING_LABEL: &str = "Submitting...";

/// Draw the modal for whatever phase the form is in
pub fn draw_registration(
    frame: &mut Frame,
    area: Rect,
    form: &RegistrationForm,
    settings: &SiteSettings,
) {
    let modal = centered_rect(area, 80, area.height.saturating_sub(2));
    frame.render_widget(Clear, modal);

    let close_label = settings.close_label();
    match &form.phase {
        FormPhase::Loading => {
            render_message_panel(frame, modal, " Registration ", "Loading form...", Color::Cyan, None)
        }
        FormPhase::Failed(message) => render_message_panel(
            frame,
            modal,
            " Registration ",
            &format!("This form is not available.\n\n{message}"),
            Color::Red,
            Some(&close_label),
        ),
        FormPhase::Success => render_message_panel(
            frame,
            modal,
            &title(form),
            form.success_message(),
            Color::Green,
            Some(&close_label),
        ),
        FormPhase::Ready | FormPhase::Submitting => draw_form_body(frame, modal, form, settings),
    }
}

fn title(form: &RegistrationForm) -> String {
    let name = form
        .definition
        .as_ref()
        .map(|d| d.name.as_str())
        .unwrap_or("Registration");
    format!(" {name} ")
}

fn draw_form_body(frame: &mut Frame, area: Rect, form: &RegistrationForm, settings: &SiteSettings) {
    let block = Block::default()
        .title(title(form))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let description = form
        .definition
        .as_ref()
        .and_then(|d| d.description.as_deref())
        .filter(|d| !d.is_empty());
    let description_height = if description.is_some() { 2 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(description_height), // Description
            Constraint::Min(0),                     // Fields
            Constraint::Length(BUTTON_HEIGHT),      // Buttons
            Constraint::Length(1),                  // Help text
        ])
        .horizontal_margin(1)
        .split(inner);

    if let Some(description) = description {
        frame.render_widget(
            Paragraph::new(description)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            chunks[0],
        );
    }

    draw_fields(frame, chunks[1], form);
    draw_buttons(frame, chunks[2], form, settings);
    draw_help(frame, chunks[3]);
}

fn draw_fields(frame: &mut Frame, area: Rect, form: &RegistrationForm) {
    let heights: Vec<u16> = form
        .fields
        .iter()
        .map(|f| field_height(f, form.error(&f.id).is_some()))
        .collect();
    let first = first_visible(&heights, form.active_field_index, area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (index, field) in form.fields.iter().enumerate().skip(first) {
        let height = heights[index];
        if y + height > bottom {
            break;
        }
        let view = FieldView {
            field,
            value: form.value(&field.id),
            error: form.error(&field.id),
            is_active: form.focus() == FocusTarget::Field(index),
            option_cursor: form.option_cursor,
        };
        draw_field(
            frame,
            Rect {
                y,
                height,
                ..area
            },
            &view,
        );
        y += height;
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, form: &RegistrationForm, settings: &SiteSettings) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Length(1),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(area);

    let submitting = form.is_submitting();
    let submit_label = if submitting {
        SUBMITTING_LABEL.to_string()
    } else {
        settings.submit_label()
    };
    let focus = form.focus();
    render_button(
        frame,
        chunks[0],
        &submit_label,
        focus == FocusTarget::SubmitButton,
        !submitting,
    );
    render_button(
        frame,
        chunks[2],
        &settings.close_label(),
        focus == FocusTarget::CloseButton,
        true,
    );
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", key),
        Span::raw(": next field  "),
        Span::styled("←/→", key),
        Span::raw(": choose  "),
        Span::styled("Space", key),
        Span::raw(": toggle  "),
        Span::styled(crate::platform::SUBMIT_SHORTCUT, key),
        Span::raw(": submit  "),
        Span::styled("Esc", key),
        Span::raw(": close"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
