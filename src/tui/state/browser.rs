use crate::fs::EntryDescriptor;
use crate::tui::state::modes::{BrowserMode, SortMode};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One row of the browser listing.
#[derive(Debug, Clone)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub count: u64,
    pub is_dir: bool,
    pub modified: Option<DateTime<Local>>,
}

impl BrowserEntry {
    pub fn is_up_link(&self) -> bool {
        self.name == ".."
    }
}

impl From<EntryDescriptor> for BrowserEntry {
    fn from(d: EntryDescriptor) -> Self {
        let name = d.name();
        BrowserEntry {
            name,
            path: d.path,
            size: d.size,
            count: d.count,
            is_dir: d.is_dir,
            modified: d.modified,
        }
    }
}

/// Progress snapshot emitted while a refresh sizes entries.
#[derive(Debug, Clone, Default)]
pub struct LoadingInfo {
    pub done: usize,
    pub total: usize,
    pub current: Option<PathBuf>,
}

/// What the user is being asked to approve. Actions are data, not closures,
/// so a queued request stays inspectable and renderable.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    Delete(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ConfirmRequest {
    pub message: String,
    pub action: ConfirmAction,
}

/// Messages a background refresh or preview thread sends back to the render
/// loop.
pub enum RefreshMessage {
    Progress(LoadingInfo),
    Listing {
        entries: Vec<BrowserEntry>,
        elapsed: Duration,
    },
    Preview {
        contents: String,
    },
}

pub struct BrowserState {
    pub current_path: PathBuf,
    pub entries: Vec<BrowserEntry>,
    pub mode: BrowserMode,
    pub sort: SortMode,
    pub auto_refresh: bool,
    pub loading: Option<LoadingInfo>,
    pub preview: Option<String>,
    pub preview_path: Option<PathBuf>,
    /// Pending confirmations, answered front-first.
    pub confirms: VecDeque<ConfirmRequest>,
    pub error: Option<String>,
    /// Receiver for the most recently started refresh. Replacing it orphans
    /// the previous thread's sender, whose results are then discarded.
    pub refresh_rx: Option<Receiver<RefreshMessage>>,
    /// Held by a refresh thread for its whole run, so two refreshes never
    /// walk the filesystem at the same time.
    pub refresh_gate: Arc<Mutex<()>>,
    pub last_elapsed: Option<Duration>,
    pub updated_at: Option<DateTime<Local>>,
}

impl BrowserState {
    pub fn new(start_path: PathBuf, sort: SortMode) -> Self {
        Self {
            current_path: start_path,
            entries: Vec::new(),
            mode: BrowserMode::Loading,
            sort,
            auto_refresh: true,
            loading: None,
            preview: None,
            preview_path: None,
            confirms: VecDeque::new(),
            error: None,
            refresh_rx: None,
            refresh_gate: Arc::new(Mutex::new(())),
            last_elapsed: None,
            updated_at: None,
        }
    }

    pub fn confirm_pending(&self) -> Option<&ConfirmRequest> {
        self.confirms.front()
    }
}
