pub mod browser;

pub use browser::{handle_browser_key, BrowserContext};
