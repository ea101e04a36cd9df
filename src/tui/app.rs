use crate::config::Config;
use crate::history::HistoryLogger;
use crate::tui::controller::{handle_browser_key, BrowserContext};
use crate::tui::service::{poll_refresh, start_refresh};
use crate::tui::state::{BrowserMode, BrowserState, SortMode};
use crate::tui::view::render;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::widgets::ListState;
use ratatui::{backend::Backend, Terminal};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub struct App {
    pub state: BrowserState,
    pub list_state: ListState,
    pub should_quit: bool,
    history: HistoryLogger,
    auto_interval: Duration,
    last_refresh: Instant,
    last_seen_update: Option<chrono::DateTime<chrono::Local>>,
}

impl App {
    pub fn new(config: &Config, start_path: PathBuf) -> Self {
        let sort = if config.browser.sort_by_size {
            SortMode::SizeDesc
        } else {
            SortMode::NameAsc
        };
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            state: BrowserState::new(start_path, sort),
            list_state,
            should_quit: false,
            history: HistoryLogger::new(),
            auto_interval: Duration::from_secs(config.browser.auto_refresh_secs),
            last_refresh: Instant::now(),
            last_seen_update: None,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        start_refresh(&mut self.state);
        self.last_refresh = Instant::now();

        while !self.should_quit {
            poll_refresh(&mut self.state);
            if self.state.updated_at != self.last_seen_update {
                // A listing just landed; restart the idle clock.
                self.last_seen_update = self.state.updated_at;
                self.last_refresh = Instant::now();
            }
            self.auto_refresh_tick();

            // A single bad frame is not worth tearing the browser down.
            if let Err(err) = terminal.draw(|f| render(f, &mut self.state, &mut self.list_state)) {
                tracing::warn!(%err, "frame draw failed");
            }

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    let mut ctx = BrowserContext {
                        list_state: &mut self.list_state,
                        state: &mut self.state,
                        should_quit: &mut self.should_quit,
                        history: &self.history,
                    };
                    handle_browser_key(&mut ctx, key.code, key.modifiers)?;
                }
            }
        }

        Ok(())
    }

    /// Re-snapshots the current directory when the listing has been on
    /// screen untouched for the configured interval. Skipped while a refresh
    /// is already in flight or a modal is up.
    fn auto_refresh_tick(&mut self) {
        if !self.state.auto_refresh
            || self.state.mode != BrowserMode::Listing
            || self.state.confirm_pending().is_some()
        {
            return;
        }
        if self.last_refresh.elapsed() >= self.auto_interval {
            start_refresh(&mut self.state);
            self.last_refresh = Instant::now();
        }
    }
}
