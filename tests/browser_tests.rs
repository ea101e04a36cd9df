//! Integration tests for the browser's refresh service and key handling.

use crossterm::event::{KeyCode, KeyModifiers};
use dirscope::history::HistoryLogger;
use dirscope::tui::controller::{handle_browser_key, BrowserContext};
use dirscope::tui::service::{poll_refresh, start_preview, start_refresh};
use dirscope::tui::state::{BrowserMode, BrowserState, ConfirmAction, ConfirmRequest, SortMode};
use ratatui::widgets::ListState;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn wait_until(state: &mut BrowserState, mut cond: impl FnMut(&BrowserState) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        poll_refresh(state);
        if cond(state) {
            return;
        }
        assert!(Instant::now() < deadline, "timed out waiting for refresh");
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn browser_at(path: &Path) -> BrowserState {
    BrowserState::new(path.to_path_buf(), SortMode::SizeDesc)
}

/// tmp/
///   big.txt    9 bytes
///   small.txt  2 bytes
///   sub/
///     nested.txt  5 bytes
fn sample_tree() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join("big.txt"), "123456789").expect("write");
    fs::write(tmp.path().join("small.txt"), "12").expect("write");
    fs::create_dir(tmp.path().join("sub")).expect("mkdir");
    fs::write(tmp.path().join("sub/nested.txt"), "12345").expect("write");
    tmp
}

#[test]
fn refresh_lists_up_link_first_then_sorted() {
    let tmp = sample_tree();
    let mut state = browser_at(tmp.path());

    start_refresh(&mut state);
    wait_until(&mut state, |s| s.mode == BrowserMode::Listing);

    assert_eq!(state.entries.len(), 4);
    assert!(state.entries[0].is_up_link());
    assert_eq!(state.entries[0].size, 0);
    assert_eq!(
        state.entries[0].path,
        tmp.path().parent().expect("parent")
    );

    let sizes: Vec<u64> = state.entries[1..].iter().map(|e| e.size).collect();
    assert_eq!(sizes, vec![9, 5, 2]);

    let sub = state.entries.iter().find(|e| e.name == "sub").expect("sub");
    assert!(sub.is_dir);
    assert_eq!(sub.count, 1);
}

#[test]
fn entering_a_directory_resets_selection_and_reloads() {
    let tmp = sample_tree();
    let mut state = browser_at(tmp.path());
    let mut list_state = ListState::default();
    let mut should_quit = false;
    let history_dir = TempDir::new().expect("tempdir");
    let history = HistoryLogger::at(history_dir.path().join("history.log"));

    start_refresh(&mut state);
    wait_until(&mut state, |s| s.mode == BrowserMode::Listing);

    let sub_idx = state
        .entries
        .iter()
        .position(|e| e.name == "sub")
        .expect("sub listed");
    list_state.select(Some(sub_idx));

    let mut ctx = BrowserContext {
        list_state: &mut list_state,
        state: &mut state,
        should_quit: &mut should_quit,
        history: &history,
    };
    handle_browser_key(&mut ctx, KeyCode::Enter, KeyModifiers::NONE).expect("key");

    assert_eq!(state.current_path, tmp.path().join("sub"));
    assert_eq!(list_state.selected(), Some(0));
    assert_eq!(state.mode, BrowserMode::Loading);

    wait_until(&mut state, |s| s.mode == BrowserMode::Listing);
    assert!(state.entries[0].is_up_link());
    assert_eq!(state.entries[0].path, tmp.path());
    assert_eq!(state.entries[1].name, "nested.txt");
}

#[test]
fn preview_shows_file_head() {
    let tmp = sample_tree();
    let mut state = browser_at(tmp.path());

    start_preview(&mut state, tmp.path().join("big.txt"));
    wait_until(&mut state, |s| s.mode == BrowserMode::FileView);

    assert_eq!(state.preview.as_deref(), Some("123456789"));
}

#[test]
fn confirmations_are_answered_front_first() {
    let tmp = sample_tree();
    let mut state = browser_at(tmp.path());
    let mut list_state = ListState::default();
    let mut should_quit = false;
    let history_dir = TempDir::new().expect("tempdir");
    let history = HistoryLogger::at(history_dir.path().join("history.log"));

    let first = tmp.path().join("small.txt");
    let second = tmp.path().join("big.txt");
    state.confirms.push_back(ConfirmRequest {
        message: format!("Delete {}?", first.display()),
        action: ConfirmAction::Delete(first.clone()),
    });
    state.confirms.push_back(ConfirmRequest {
        message: format!("Delete {}?", second.display()),
        action: ConfirmAction::Delete(second.clone()),
    });

    let mut ctx = BrowserContext {
        list_state: &mut list_state,
        state: &mut state,
        should_quit: &mut should_quit,
        history: &history,
    };

    // Approve the first, decline the second.
    handle_browser_key(&mut ctx, KeyCode::Char('y'), KeyModifiers::NONE).expect("key");
    assert!(!first.exists());
    assert!(second.exists());
    assert_eq!(ctx.state.confirms.len(), 1);

    handle_browser_key(&mut ctx, KeyCode::Char('n'), KeyModifiers::NONE).expect("key");
    assert!(second.exists());
    assert!(ctx.state.confirms.is_empty());

    let logged = history.read_history(None).expect("history");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].path, first);
}

#[test]
fn refresh_recomputes_changed_sizes() {
    let tmp = TempDir::new().expect("tempdir");
    fs::create_dir(tmp.path().join("sub")).expect("mkdir");
    fs::write(tmp.path().join("sub/inner.txt"), "12345").expect("write");

    let mut state = browser_at(tmp.path());
    start_refresh(&mut state);
    wait_until(&mut state, |s| s.mode == BrowserMode::Listing);

    let sub_size = |s: &BrowserState| {
        s.entries
            .iter()
            .find(|e| e.name == "sub")
            .map(|e| e.size)
    };
    assert_eq!(sub_size(&state), Some(5));

    let first_update = state.updated_at;
    fs::write(tmp.path().join("sub/inner.txt"), "1234567890").expect("write");

    start_refresh(&mut state);
    wait_until(&mut state, |s| s.updated_at != first_update);

    // The new listing reflects the grown file, not a remembered total.
    assert_eq!(sub_size(&state), Some(10));
}

#[test]
fn sort_toggle_reloads_the_listing() {
    let tmp = sample_tree();
    let mut state = browser_at(tmp.path());
    let mut list_state = ListState::default();
    let mut should_quit = false;
    let history_dir = TempDir::new().expect("tempdir");
    let history = HistoryLogger::at(history_dir.path().join("history.log"));

    start_refresh(&mut state);
    wait_until(&mut state, |s| s.mode == BrowserMode::Listing);
    let first_update = state.updated_at;

    let mut ctx = BrowserContext {
        list_state: &mut list_state,
        state: &mut state,
        should_quit: &mut should_quit,
        history: &history,
    };
    handle_browser_key(&mut ctx, KeyCode::Char('s'), KeyModifiers::NONE).expect("key");

    assert_eq!(state.sort, SortMode::NameAsc);
    assert_eq!(state.mode, BrowserMode::Loading);

    wait_until(&mut state, |s| s.updated_at != first_update);
    let names: Vec<&str> = state.entries[1..].iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["big.txt", "small.txt", "sub"]);
}

#[test]
fn failed_delete_reports_and_reloads() {
    let tmp = sample_tree();
    let mut state = browser_at(tmp.path());
    let mut list_state = ListState::default();
    let mut should_quit = false;
    let history_dir = TempDir::new().expect("tempdir");
    let history = HistoryLogger::at(history_dir.path().join("history.log"));

    let ghost = tmp.path().join("ghost.txt");
    state.confirms.push_back(ConfirmRequest {
        message: format!("Delete {}?", ghost.display()),
        action: ConfirmAction::Delete(ghost),
    });

    let mut ctx = BrowserContext {
        list_state: &mut list_state,
        state: &mut state,
        should_quit: &mut should_quit,
        history: &history,
    };
    handle_browser_key(&mut ctx, KeyCode::Char('y'), KeyModifiers::NONE).expect("key");

    assert!(state.error.is_some());
    assert_eq!(state.mode, BrowserMode::Loading);
    assert!(history.read_history(None).expect("history").is_empty());

    wait_until(&mut state, |s| s.mode == BrowserMode::Listing);
    assert_eq!(state.entries.len(), 4);
}

#[test]
fn newer_refresh_supersedes_older() {
    let tmp = sample_tree();
    let mut state = browser_at(tmp.path());

    start_refresh(&mut state);
    state.current_path = tmp.path().join("sub");
    start_refresh(&mut state);

    wait_until(&mut state, |s| s.mode == BrowserMode::Listing);
    // Only the newest request's listing is visible.
    assert_eq!(state.entries[0].path, tmp.path());
    assert!(state
        .entries
        .iter()
        .any(|e| e.name == "nested.txt"));
    assert!(!state.entries.iter().any(|e| e.name == "big.txt"));
}
