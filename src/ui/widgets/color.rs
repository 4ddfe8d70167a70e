use ratatui::style::Color;

/// Parse `#RRGGBB`; anything else renders as gray
pub fn hex_color(value: &str) -> Color {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Color::Gray;
    }
    match u32::from_str_radix(hex, 16) {
        Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        Err(_) => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#4CAF50"), Color::Rgb(0x4C, 0xAF, 0x50));
        assert_eq!(hex_color("2196F3"), Color::Rgb(0x21, 0x96, 0xF3));
        assert_eq!(hex_color("#fff"), Color::Gray);
        assert_eq!(hex_color("#zzzzzz"), Color::Gray);
    }
}
