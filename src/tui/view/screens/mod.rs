pub mod browser;
pub mod loading;
pub mod preview;

pub use browser::render_browser;
pub use loading::render_loading;
pub use preview::render_preview;
