mod browser;
mod common;
mod session;
mod tab_strip;

// Public API
pub use browser::display_catalog_browser;
pub use session::TerminalSession;
pub use tab_strip::TabStrip;
