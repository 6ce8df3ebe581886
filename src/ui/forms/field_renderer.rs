//! Field rendering: one control per field type

use crate::state::{FieldDefinition, FieldType, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows used by a multi-line text area (including borders)
const TEXTAREA_HEIGHT: u16 = 6;
/// Rows used by a bordered single-line control
const INPUT_HEIGHT: u16 = 3;

pub const NONE_SELECTED: &str = "-- Select an option --";

/// Everything needed to draw one field
pub struct FieldView<'a> {
    pub field: &'a FieldDefinition,
    pub value: Option<&'a FieldValue>,
    pub error: Option<&'a str>,
    pub is_active: bool,
    /// Highlighted option for checkbox/radio groups
    pub option_cursor: usize,
}

/// Rows the field occupies, including its error line
pub fn field_height(field: &FieldDefinition, has_error: bool) -> u16 {
    let control = match field.field_type {
        FieldType::Textarea => TEXTAREA_HEIGHT,
        FieldType::Checkbox | FieldType::Radio => u16::try_from(field.options.len().max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(2),
        FieldType::Select
        | FieldType::Text
        | FieldType::Email
        | FieldType::Phone
        | FieldType::Other(_) => INPUT_HEIGHT,
    };
    control.saturating_add(u16::from(has_error))
}

/// Draw a field and its inline error into `area`
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let has_error = view.error.is_some();
    let control_height = area.height.saturating_sub(u16::from(has_error));
    let control_area = Rect {
        height: control_height,
        ..area
    };

    let border_color = match (view.is_active, has_error) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };
    let block = Block::default()
        .title(field_title(view.field))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let content = match view.field.field_type {
        FieldType::Textarea => text_area(view),
        FieldType::Select => select(view),
        FieldType::Checkbox => option_group(view, "[x]", "[ ]"),
        FieldType::Radio => option_group(view, "(•)", "( )"),
        FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Other(_) => {
            text_input(view)
        }
    };
    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(block),
        control_area,
    );

    if let Some(error) = view.error {
        let error_area = Rect {
            y: area.y + control_height,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            )),
            error_area,
        );
    }
}

/// Block title: label, required marker, and the input sub-type for single-line inputs
fn field_title(field: &FieldDefinition) -> String {
    let required = if field.required { " *" } else { "" };
    match field.field_type {
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Select
        | FieldType::Checkbox
        | FieldType::Radio => format!(" {}{} ", field.label, required),
        FieldType::Email | FieldType::Phone | FieldType::Other(_) => format!(
            " {}{} ({}) ",
            field.label,
            required,
            field.field_type.input_hint()
        ),
    }
}

fn text_of<'a>(view: &FieldView<'a>) -> &'a str {
    view.value.and_then(FieldValue::as_text).unwrap_or_default()
}

fn cursor(view: &FieldView) -> Span<'static> {
    let symbol = if view.is_active { "▌" } else { "" };
    Span::styled(symbol, Style::default().fg(Color::Cyan))
}

fn placeholder_line<'a>(view: &FieldView<'a>) -> Line<'a> {
    let placeholder = view.field.placeholder.as_deref().unwrap_or_default();
    Line::from(vec![
        cursor(view),
        Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
    ])
}

fn text_input<'a>(view: &FieldView<'a>) -> Vec<Line<'a>> {
    let value = text_of(view);
    if value.is_empty() {
        return vec![placeholder_line(view)];
    }
    vec![Line::from(vec![Span::raw(value), cursor(view)])]
}

fn text_area<'a>(view: &FieldView<'a>) -> Vec<Line<'a>> {
    let value = text_of(view);
    if value.is_empty() {
        return vec![placeholder_line(view)];
    }
    let mut lines: Vec<Line> = value.split('\n').map(Line::from).collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor(view));
    }
    lines
}

fn select<'a>(view: &FieldView<'a>) -> Vec<Line<'a>> {
    let value = text_of(view);
    let (label, style) = if value.is_empty() {
        (NONE_SELECTED, Style::default().fg(Color::DarkGray))
    } else {
        (value, Style::default())
    };
    let arrows = if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    vec![Line::from(vec![
        Span::styled("‹ ", arrows),
        Span::styled(label, style),
        Span::styled(" ›", arrows),
    ])]
}

fn option_group<'a>(view: &FieldView<'a>, on: &'static str, off: &'static str) -> Vec<Line<'a>> {
    view.field
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let checked = view.value.is_some_and(|v| v.contains(option));
            let highlighted = view.is_active && i == view.option_cursor;
            let style = if highlighted {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{} {}", if checked { on } else { off }, option),
                style,
            ))
        })
        .collect()
}

/// First field index to draw so that the active field is fully visible
pub fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let active = active.min(heights.len() - 1);
    let mut used = 0u16;
    let mut first = active;
    for i in (0..=active).rev() {
        used = used.saturating_add(heights[i]);
        if used > available {
            break;
        }
        first = i;
    }
    first
}
