pub mod browser;
pub mod modes;

pub use browser::{
    BrowserEntry, BrowserState, ConfirmAction, ConfirmRequest, LoadingInfo, RefreshMessage,
};
pub use modes::{BrowserMode, SortMode};
