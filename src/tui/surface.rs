use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

/// A text area that widgets write styled content into.
pub trait TextSurface: Send {
    fn set_background_color(&mut self, color: Color);
    fn set_text_color(&mut self, color: Color);
    fn set_text_align(&mut self, align: Alignment);
    /// Enables interpretation of inline `[fg:bg:flags]` style codes.
    fn set_dynamic_colors(&mut self, enabled: bool);
    fn clear(&mut self);
    fn write_text(&mut self, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    background: Color,
    foreground: Color,
    align: Alignment,
    dynamic_colors: bool,
    content: String,
}

impl Default for TextView {
    fn default() -> Self {
        Self::new()
    }
}

impl TextView {
    pub fn new() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Reset,
            align: Alignment::Left,
            dynamic_colors: false,
            content: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    pub fn text_color(&self) -> Color {
        self.foreground
    }

    pub fn text_align(&self) -> Alignment {
        self.align
    }

    pub fn dynamic_colors(&self) -> bool {
        self.dynamic_colors
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn line(&self) -> Line<'static> {
        if self.dynamic_colors {
            parse_style_codes(&self.content, self.base_style())
        } else {
            Line::from(Span::styled(self.content.clone(), self.base_style()))
        }
    }
}

impl TextSurface for TextView {
    fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    fn set_text_color(&mut self, color: Color) {
        self.foreground = color;
    }

    fn set_text_align(&mut self, align: Alignment) {
        self.align = align;
    }

    fn set_dynamic_colors(&mut self, enabled: bool) {
        self.dynamic_colors = enabled;
    }

    fn clear(&mut self) {
        self.content.clear();
    }

    fn write_text(&mut self, text: &str) {
        self.content.push_str(text);
    }
}

impl Widget for &TextView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line())
            .style(self.base_style())
            .alignment(self.align)
            .render(area, buf);
    }
}

fn style_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[([#a-zA-Z0-9-]*)(?::([#a-zA-Z0-9-]*))?(?::([a-zA-Z-]*))?\]")
            .expect("Failed to compile style code regex")
    })
}

/// Running style while walking a text with style codes.
#[derive(Debug, Clone, Copy)]
struct CodeState {
    fg: Option<Color>,
    bg: Option<Color>,
    modifiers: Modifier,
}

impl CodeState {
    fn style(&self, base: Style) -> Style {
        let mut style = base;
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        style.add_modifier(self.modifiers)
    }

    /// Applies a tag, returning `None` when it is not a valid style code.
    fn apply(self, fg: &str, bg: Option<&str>, flags: Option<&str>) -> Option<Self> {
        let mut next = self;
        next.fg = parse_color_part(fg, self.fg)?;
        if let Some(bg) = bg {
            next.bg = parse_color_part(bg, self.bg)?;
        }
        if let Some(flags) = flags {
            next.modifiers = parse_flags(flags, self.modifiers)?;
        }
        Some(next)
    }
}

fn parse_color_part(part: &str, current: Option<Color>) -> Option<Option<Color>> {
    match part {
        "" => Some(current),
        "-" => Some(None),
        name => Color::from_str(name).ok().map(Some),
    }
}

fn parse_flags(flags: &str, current: Modifier) -> Option<Modifier> {
    match flags {
        "" => Some(current),
        "-" => Some(Modifier::empty()),
        letters => letters.chars().try_fold(Modifier::empty(), |acc, c| {
            let flag = match c {
                'b' => Modifier::BOLD,
                'd' => Modifier::DIM,
                'i' => Modifier::ITALIC,
                'u' => Modifier::UNDERLINED,
                'r' => Modifier::REVERSED,
                'l' => Modifier::SLOW_BLINK,
                _ => return None,
            };
            Some(acc | flag)
        }),
    }
}

/// Renders `text` into a line, interpreting `[fg:bg:flags]` style codes.
/// Tags that don't parse are kept verbatim.
pub fn parse_style_codes(text: &str, base: Style) -> Line<'static> {
    let mut spans = Vec::new();
    let mut state = CodeState {
        fg: None,
        bg: None,
        modifiers: Modifier::empty(),
    };
    let mut pending = String::new();
    let mut last = 0;

    for caps in style_code_pattern().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        pending.push_str(&text[last..whole.start()]);
        last = whole.end();

        let fg = caps.get(1).map_or("", |m| m.as_str());
        let bg = caps.get(2).map(|m| m.as_str());
        let flags = caps.get(3).map(|m| m.as_str());

        // A bare "[]" carries no information; treat it as text.
        let is_empty_tag = fg.is_empty() && bg.is_none() && flags.is_none();
        match state.apply(fg, bg, flags).filter(|_| !is_empty_tag) {
            Some(next) => {
                if !pending.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut pending), state.style(base)));
                }
                state = next;
            }
            None => pending.push_str(whole.as_str()),
        }
    }

    pending.push_str(&text[last..]);
    if !pending.is_empty() {
        spans.push(Span::styled(pending, state.style(base)));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_text_view_defaults() {
        let view = TextView::new();
        assert_eq!(view.text(), "");
        assert_eq!(view.text_align(), Alignment::Left);
        assert!(!view.dynamic_colors());
        assert_eq!(view.background_color(), Color::Reset);
    }

    #[test]
    fn test_write_and_clear() {
        let mut view = TextView::new();
        view.write_text("hello ");
        view.write_text("world");
        assert_eq!(view.text(), "hello world");

        view.clear();
        assert_eq!(view.text(), "");
    }

    #[test]
    fn test_bold_code_applies_to_following_text() {
        let line = parse_style_codes("[::b]Wrap: On", Style::default());
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Wrap: On");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_color_codes_and_reset() {
        let base = Style::default().fg(Color::White);
        let line = parse_style_codes("a[red]b[-]c", base);

        assert_eq!(plain(&line), "abc");
        assert_eq!(line.spans[0].style.fg, Some(Color::White));
        assert_eq!(line.spans[1].style.fg, Some(Color::Red));
        assert_eq!(line.spans[2].style.fg, Some(Color::White));
    }

    #[test]
    fn test_background_and_hex_colors() {
        let line = parse_style_codes("[:#1e90ff:u]x", Style::default());
        assert_eq!(line.spans[0].style.bg, Some(Color::Rgb(0x1e, 0x90, 0xff)));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_flag_reset_clears_modifiers() {
        let line = parse_style_codes("[::bi]x[::-]y", Style::default());
        assert!(line.spans[0].style.add_modifier.contains(Modifier::ITALIC));
        assert!(line.spans[1].style.add_modifier.is_empty());
    }

    #[test]
    fn test_invalid_tags_stay_literal() {
        let line = parse_style_codes("[notacolor] [::z] []", Style::default());
        assert_eq!(plain(&line), "[notacolor] [::z] []");
    }

    #[test]
    fn test_dynamic_colors_disabled_keeps_codes() {
        let mut view = TextView::new();
        view.write_text("[::b]x");
        assert_eq!(plain(&view.line()), "[::b]x");

        view.set_dynamic_colors(true);
        assert_eq!(plain(&view.line()), "x");
    }

    #[test]
    fn test_widget_renders_centered() {
        let mut view = TextView::new();
        view.set_text_align(Alignment::Center);
        view.write_text("ab");

        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        (&view).render(area, &mut buf);

        assert_eq!(buf[(2, 0)].symbol(), "a");
        assert_eq!(buf[(3, 0)].symbol(), "b");
    }
}
