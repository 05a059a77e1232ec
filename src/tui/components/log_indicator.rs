use crate::config::AppConfig;
use crate::tui::styles::{StyleRegistry, Styles, StylesListener};
use crate::tui::surface::{TextSurface, TextView};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::Widget,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Minimum column width of each status field, so fields stay aligned across redraws.
pub const FIELD_WIDTH: usize = 20;

pub fn on_off(value: bool) -> &'static str {
    if value { "On" } else { "Off" }
}

/// Shared autoscroll flag. Cloneable and safe to flip from any thread.
/// A flip made here is not drawn until the owner calls
/// [`LogIndicator::sync_auto_scroll`] before its next draw.
#[derive(Debug, Clone)]
pub struct AutoScroll(Arc<AtomicBool>);

impl AutoScroll {
    fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn is_on(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Flips the flag in a single atomic step and returns the new value.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::AcqRel)
    }

    /// Turns autoscroll off if it is on. Returns whether this call changed it.
    pub fn disable(&self) -> bool {
        self.0
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// The indicator's surface, shared with the style registry as a weak listener.
struct IndicatorSurface<S> {
    surface: Mutex<S>,
}

impl<S: TextSurface> IndicatorSurface<S> {
    fn lock(&self) -> MutexGuard<'_, S> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: TextSurface> StylesListener for IndicatorSurface<S> {
    fn styles_changed(&self, styles: &Styles) {
        let indicator = styles.indicator();
        let mut surface = self.lock();
        surface.set_background_color(indicator.bg_color.color());
        surface.set_text_color(indicator.fg_color.color());
    }
}

/// Status line for a log pane showing the autoscroll, full-screen, timestamp
/// and wrap modes.
///
/// The autoscroll flag lives behind an [`AutoScroll`] handle that other threads
/// may toggle. Every other mutator takes `&mut self` and belongs to the thread
/// that owns the indicator and draws it.
pub struct LogIndicator<S: TextSurface + 'static = TextView> {
    auto_scroll: AutoScroll,
    rendered_auto_scroll: bool,
    full_screen: bool,
    text_wrap: bool,
    show_time: bool,
    surface: Arc<IndicatorSurface<S>>,
}

impl LogIndicator<TextView> {
    pub fn new(config: &AppConfig, styles: &StyleRegistry) -> Self {
        Self::with_surface(config, styles, TextView::new())
    }
}

impl<S: TextSurface + 'static> LogIndicator<S> {
    pub fn with_surface(config: &AppConfig, styles: &StyleRegistry, surface: S) -> Self {
        let surface = Arc::new(IndicatorSurface {
            surface: Mutex::new(surface),
        });
        surface.styles_changed(&styles.current());
        {
            let mut view = surface.lock();
            view.set_text_align(Alignment::Center);
            view.set_dynamic_colors(true);
        }
        styles.add_listener(&surface);

        let mut indicator = Self {
            auto_scroll: AutoScroll::new(true),
            rendered_auto_scroll: true,
            full_screen: config.logger.full_screen_logs,
            text_wrap: false,
            show_time: false,
            surface,
        };
        indicator.refresh();
        indicator
    }

    pub fn is_auto_scroll(&self) -> bool {
        self.auto_scroll.is_on()
    }

    pub fn timestamp(&self) -> bool {
        self.show_time
    }

    pub fn text_wrap(&self) -> bool {
        self.text_wrap
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    /// Handle for toggling autoscroll from outside the render thread.
    pub fn auto_scroll_handle(&self) -> AutoScroll {
        self.auto_scroll.clone()
    }

    pub fn toggle_auto_scroll(&mut self) {
        self.auto_scroll.toggle();
        self.refresh();
    }

    pub fn toggle_full_screen(&mut self) {
        self.full_screen = !self.full_screen;
        self.refresh();
    }

    pub fn toggle_text_wrap(&mut self) {
        self.text_wrap = !self.text_wrap;
        self.refresh();
    }

    /// Timestamps change how log lines are formatted, not this line, so no
    /// refresh happens here.
    pub fn toggle_timestamp(&mut self) {
        self.show_time = !self.show_time;
    }

    /// Re-renders if autoscroll was flipped through a handle since the last
    /// render. Returns whether a refresh happened.
    pub fn sync_auto_scroll(&mut self) -> bool {
        if self.auto_scroll.is_on() == self.rendered_auto_scroll {
            return false;
        }
        self.refresh();
        true
    }

    pub fn refresh(&mut self) {
        let auto_scroll = self.auto_scroll.is_on();
        {
            let mut view = self.surface.lock();
            view.clear();
            for (label, value) in [
                ("Autoscroll", auto_scroll),
                ("FullScreen", self.full_screen),
                ("Timestamps", self.show_time),
                ("Wrap", self.text_wrap),
            ] {
                let status = format!("{}: {}", label, on_off(value));
                view.write_text(&format!("[::b]{:<width$}", status, width = FIELD_WIDTH));
            }
        }
        self.rendered_auto_scroll = auto_scroll;
    }

    /// Re-applies the indicator colors from `styles`. The text is left as is.
    pub fn styles_changed(&self, styles: &Styles) {
        self.surface.styles_changed(styles);
    }

    pub fn surface(&self) -> MutexGuard<'_, S> {
        self.surface.lock()
    }
}

impl Widget for &LogIndicator<TextView> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.surface();
        (&*view).render(area, buf);
    }
}

#[cfg(test)]
#[path = "log_indicator_tests.rs"]
mod tests;
