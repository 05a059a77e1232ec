use ratatui::style::Color;

pub mod palette {
    use super::*;

    pub const PRIMARY_BORDER: Color = Color::Cyan;
    pub const PRIMARY_TEXT: Color = Color::White;
    pub const HEADER_TITLE: Color = Color::Rgb(142, 240, 204);
}
