use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::AppState;

/// A UI Screen boundary: renders one widget's current stage
pub trait Screen {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// Helper to pick the screen for the current state
pub fn current_screen(state: &AppState) -> &dyn Screen {
    match state {
        AppState::Typing(view) => view,
        AppState::Profile(view) => view,
    }
}
