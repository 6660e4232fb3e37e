use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

/// Key and mouse bindings, in two columns so the whole list fits 80x24.
pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(68);
    let popup_height = area.height.saturating_sub(4).max(14);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let left = vec![
        Line::styled("Blocks", section_style),
        Line::raw("  j/k, Up/Down   Select"),
        Line::raw("  a              Add"),
        Line::raw("  x, Delete      Remove"),
        Line::raw("  J/K, Alt-Dn/Up Move"),
        Line::raw(""),
        Line::styled("Fields", section_style),
        Line::raw("  Tab, S-Tab     Focus field"),
        Line::raw("  h/l, Lt/Rt     Change choice"),
        Line::raw("  Enter, e       Edit text"),
        Line::raw("  Esc            Stop editing"),
    ];
    let right = vec![
        Line::styled("Mouse", section_style),
        Line::raw("  Drag ≡/border  Reorder blocks"),
        Line::raw("  Click choice   Next option"),
        Line::raw("  Right click    Previous"),
        Line::raw("  Click text     Edit text"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  s   Show block structure"),
        Line::raw("  q   Quit (also Ctrl-c)"),
        Line::raw("  ?   Toggle help"),
        Line::raw(""),
        Line::styled("any key closes", dim_style),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);
    let [left_area, right_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(inner);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    frame.render_widget(Paragraph::new(left), left_area);
    frame.render_widget(Paragraph::new(right), right_area);
}

/// Read-only view of the block sequence as JSON.
pub fn render_structure_overlay(dump: &str, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(8).max(40);
    let popup_height = area.height.saturating_sub(4).max(8);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = Block::default()
        .title("Estrutura dos Blocos")
        .title_bottom(Line::styled(
            " Esc closes ",
            Style::default().fg(Color::Indexed(245)),
        ))
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let body = Paragraph::new(dump)
        .style(Style::default().fg(Color::Green))
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
