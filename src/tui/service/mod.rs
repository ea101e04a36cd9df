pub mod refresh;

pub use refresh::{poll_refresh, sort_browser_entries, start_preview, start_refresh};
