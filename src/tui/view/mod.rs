pub mod components;
pub mod screens;

use crate::tui::state::{BrowserMode, BrowserState};
use components::modal::render_confirm_modal;
use ratatui::widgets::ListState;
use ratatui::Frame;
use screens::{render_browser, render_loading, render_preview};

/// Draws exactly one screen per frame. Priority: a refresh in flight shows
/// the loading screen, then a pending confirmation, then an open file
/// preview, then the listing.
pub fn render(f: &mut Frame, state: &mut BrowserState, list_state: &mut ListState) {
    if state.mode == BrowserMode::Loading {
        render_loading(f, state);
        return;
    }
    if let Some(request) = state.confirm_pending() {
        let request = request.clone();
        render_browser(f, list_state, state);
        render_confirm_modal(f, &request);
        return;
    }
    if state.mode == BrowserMode::FileView {
        render_preview(f, state);
        return;
    }
    render_browser(f, list_state, state);
}
