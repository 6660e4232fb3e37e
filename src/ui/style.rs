//! Colors and styles for the block editors.

use ratatui::style::{Color, Modifier, Style};

/// Parse a `#RRGGBB` color token. Anything else yields `None`.
pub fn parse_hex_color(token: &str) -> Option<Color> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Border style of a block editor, tinted with the block's color tag.
pub fn block_border_style(color: &str, selected: bool, dragging: bool) -> Style {
    let base = parse_hex_color(color).map_or_else(Style::default, |c| Style::default().fg(c));
    let base = if selected {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    };
    if dragging {
        base.add_modifier(Modifier::DIM)
    } else {
        base
    }
}

/// A choice control (voice or color); reversed while it has keyboard focus.
pub fn choice_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::ITALIC)
}

pub fn remove_button_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn button_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette_colors() {
        assert_eq!(parse_hex_color("#007BFF"), Some(Color::Rgb(0x00, 0x7B, 0xFF)));
        assert_eq!(parse_hex_color("#dc3545"), Some(Color::Rgb(0xDC, 0x35, 0x45)));
    }

    #[test]
    fn test_parse_rejects_non_hex_tokens() {
        assert_eq!(parse_hex_color("blue"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_unknown_color_keeps_default_border() {
        assert_eq!(block_border_style("magenta", false, false), Style::default());
    }

    #[test]
    fn test_dragging_block_is_dimmed() {
        let style = block_border_style("#28A745", false, true);
        assert!(style.add_modifier.contains(Modifier::DIM));
    }
}
