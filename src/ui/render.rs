use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::app::Model;
use crate::blocks::{Field, TEXT_PLACEHOLDER};

use super::layout::{REMOVE_LABEL, ScreenLayout, SlotLayout, TEXT_ROWS};
use super::{overlays, status, style};

/// Render the complete UI.
///
/// Also records the frame's geometry on the model; mouse hit tests and
/// drag hover ticks use it until the next frame.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    model.width = area.width;
    model.height = area.height;
    model.layout = ScreenLayout::compute(area, model.store.len(), model.scroll_offset);

    let title = Paragraph::new(format!(" {}", model.title)).style(style::title_style());
    frame.render_widget(title, model.layout.title);

    if model.store.is_empty() {
        let hint = Paragraph::new(Line::styled(
            "  Nenhum bloco. Pressione 'a' ou clique em [+ Adicionar Bloco].",
            style::placeholder_style(),
        ));
        frame.render_widget(hint, model.layout.list);
    }
    for slot in &model.layout.slots {
        render_block(model, frame, slot);
    }

    status::render_buttons(model, frame);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, model.layout.status);
    } else {
        status::render_status_bar(model, frame, model.layout.status);
    }

    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    } else if let Some(dump) = model.structure_dump.as_deref() {
        overlays::render_structure_overlay(dump, frame, area);
    }
}

fn render_block(model: &Model, frame: &mut Frame, slot: &SlotLayout) {
    let Some(block) = model.store.get(slot.index) else {
        return;
    };
    let selected = model.selected == slot.index;
    let dragging = model.drag.dragged_index() == Some(slot.index);
    let editing = model.editing_index() == Some(slot.index);
    let focused = |field: Field| selected && !editing && model.focus == field;

    let mut title = format!(" Bloco {} ", slot.index + 1);
    if dragging {
        title.push_str("(movendo) ");
    }
    let frame_block = Block::bordered()
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(style::block_border_style(&block.color, selected, dragging))
        .title(title);
    frame.render_widget(frame_block, slot.area);

    frame.render_widget(Paragraph::new("≡"), slot.grip);

    let voice = Paragraph::new(format!("◂ {:<16} ▸", block.voice_label()))
        .style(style::choice_style(focused(Field::Voice)));
    frame.render_widget(voice, slot.voice);

    let swatch = style::parse_hex_color(&block.color)
        .map_or_else(Style::default, |c| Style::default().fg(c));
    let color = Paragraph::new(Line::from(vec![
        Span::raw("◂ "),
        Span::styled(block.color_label().to_string(), swatch),
        Span::raw(" ▸"),
    ]))
    .style(style::choice_style(focused(Field::Color)));
    frame.render_widget(color, slot.color);

    frame.render_widget(
        Paragraph::new(REMOVE_LABEL).style(style::remove_button_style()),
        slot.remove,
    );

    let rows = usize::from(TEXT_ROWS);
    if let Some(edit) = model.text_edit.as_ref().filter(|_| editing) {
        let (cursor_line, cursor_col) = edit.field.cursor_display();
        let start = cursor_line.saturating_sub(rows - 1);
        let lines: Vec<Line> = (start..start + rows)
            .filter_map(|i| edit.field.line_at(i))
            .map(Line::raw)
            .collect();
        frame.render_widget(Paragraph::new(lines), slot.text);

        let x = u16::try_from(cursor_col)
            .unwrap_or(u16::MAX)
            .min(slot.text.width.saturating_sub(1));
        let y = u16::try_from(cursor_line - start).unwrap_or(0);
        frame.set_cursor_position(Position::new(slot.text.x + x, slot.text.y + y));
    } else if block.text.is_empty() {
        let placeholder = Paragraph::new(TEXT_PLACEHOLDER).style(style::placeholder_style());
        frame.render_widget(placeholder, slot.text);
    } else {
        let text_style = if focused(Field::Text) {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        let lines: Vec<Line> = block.text.lines().take(rows).map(Line::raw).collect();
        frame.render_widget(Paragraph::new(lines).style(text_style), slot.text);
    }
}
