use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::layout::{ADD_LABEL, STRUCTURE_LABEL};
use super::style;

pub fn render_buttons(model: &Model, frame: &mut Frame) {
    frame.render_widget(
        Paragraph::new(ADD_LABEL).style(style::button_style()),
        model.layout.add_button,
    );
    frame.render_widget(
        Paragraph::new(STRUCTURE_LABEL).style(style::button_style()),
        model.layout.structure_button,
    );
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let len = model.store.len();
    let position = if len == 0 {
        "sem blocos".to_string()
    } else {
        format!("Bloco {}/{}", model.selected + 1, len)
    };
    let mode = if model.drag.is_dragging() {
        "  [arrastando]"
    } else if model.is_editing_text() {
        "  [texto: Esc para sair]"
    } else {
        ""
    };
    let status = format!(" {}  [{}]{}  ?:help", position, model.focus, mode);

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
