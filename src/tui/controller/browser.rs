use crate::history::HistoryLogger;
use crate::tui::service::{start_preview, start_refresh};
use crate::tui::state::{BrowserMode, BrowserState, ConfirmAction, ConfirmRequest};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::ListState;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct BrowserContext<'a> {
    pub list_state: &'a mut ListState,
    pub state: &'a mut BrowserState,
    pub should_quit: &'a mut bool,
    pub history: &'a HistoryLogger,
}

pub fn handle_browser_key(
    ctx: &mut BrowserContext,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<()> {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        *ctx.should_quit = true;
        return Ok(());
    }

    // A pending confirmation swallows every key until it is answered.
    if ctx.state.confirm_pending().is_some() {
        return handle_confirm_key(ctx, code);
    }

    if ctx.state.mode == BrowserMode::FileView {
        return handle_file_view_key(ctx, code);
    }

    match code {
        KeyCode::Char('q') => *ctx.should_quit = true,
        KeyCode::Up => {
            if let Some(current) = ctx.list_state.selected() {
                if current > 0 {
                    ctx.list_state.select(Some(current - 1));
                }
            }
        }
        KeyCode::Down => {
            let max = ctx.state.entries.len().saturating_sub(1);
            if let Some(current) = ctx.list_state.selected() {
                if current < max {
                    ctx.list_state.select(Some(current + 1));
                }
            }
        }
        KeyCode::Enter | KeyCode::Right => {
            let target = selected_entry(ctx).map(|e| (e.is_dir, e.path.clone()));
            if let Some((is_dir, path)) = target {
                if is_dir {
                    navigate(ctx, path);
                } else {
                    start_preview(ctx.state, path);
                }
            }
        }
        KeyCode::Char('[') => ctx.list_state.select(Some(0)),
        KeyCode::Char(']') => {
            if !ctx.state.entries.is_empty() {
                ctx.list_state.select(Some(ctx.state.entries.len() - 1));
            }
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
            if let Some(parent) = ctx.state.current_path.parent() {
                if parent != ctx.state.current_path {
                    navigate(ctx, parent.to_path_buf());
                }
            }
        }
        KeyCode::Char('~') => {
            if let Some(home) = dirs::home_dir() {
                navigate(ctx, home);
            }
        }
        KeyCode::Delete => queue_delete(ctx),
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => queue_delete(ctx),
        KeyCode::Char('r') => start_refresh(ctx.state),
        KeyCode::Char('s') => {
            // Sort changes reload rather than reorder, so sizes are current.
            ctx.state.sort = ctx.state.sort.next();
            start_refresh(ctx.state);
        }
        KeyCode::Char('a') => ctx.state.auto_refresh = !ctx.state.auto_refresh,
        KeyCode::Char('o') => {
            let target = selected_entry(ctx)
                .map(|e| e.path.clone())
                .unwrap_or_else(|| ctx.state.current_path.clone());
            if let Err(err) = open::that(&target) {
                warn!(path = %target.display(), %err, "cannot open in system handler");
                ctx.state.error = Some(format!("cannot open {}", target.display()));
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_key(ctx: &mut BrowserContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(request) = ctx.state.confirms.pop_front() {
                perform(ctx, request.action);
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            ctx.state.confirms.pop_front();
        }
        _ => {}
    }
    Ok(())
}

fn handle_file_view_key(ctx: &mut BrowserContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => {
            ctx.state.preview = None;
            ctx.state.preview_path = None;
            ctx.state.mode = BrowserMode::Listing;
        }
        _ => {}
    }
    Ok(())
}

fn selected_entry<'a>(ctx: &'a BrowserContext<'_>) -> Option<&'a crate::tui::state::BrowserEntry> {
    ctx.list_state
        .selected()
        .and_then(|idx| ctx.state.entries.get(idx))
}

fn navigate(ctx: &mut BrowserContext, path: PathBuf) {
    ctx.state.current_path = path;
    ctx.state.error = None;
    ctx.list_state.select(Some(0));
    start_refresh(ctx.state);
}

fn queue_delete(ctx: &mut BrowserContext) {
    let target = selected_entry(ctx)
        .filter(|e| !e.is_up_link())
        .map(|e| e.path.clone());
    if let Some(path) = target {
        ctx.state.confirms.push_back(ConfirmRequest {
            message: format!("Delete {}?", path.display()),
            action: ConfirmAction::Delete(path),
        });
    }
}

fn perform(ctx: &mut BrowserContext, action: ConfirmAction) {
    match action {
        ConfirmAction::Delete(path) => {
            let size = ctx
                .state
                .entries
                .iter()
                .find(|e| e.path == path)
                .map(|e| e.size);
            let result = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            match result {
                Ok(()) => {
                    info!(path = %path.display(), "deleted");
                    if let Err(err) = ctx.history.log_delete(&path, size) {
                        warn!(%err, "cannot record deletion");
                    }
                    start_refresh(ctx.state);
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "delete failed");
                    ctx.state.error = Some(format!("delete failed: {}", err));
                    // The entry may be half-gone; show the real state.
                    start_refresh(ctx.state);
                }
            }
        }
    }
}
