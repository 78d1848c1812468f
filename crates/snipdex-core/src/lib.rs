pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod drag;
pub mod error;
pub mod gesture;
pub mod links;
pub mod logging;
pub mod models;

// Re-export common items for convenience
pub use catalog::Catalog;
pub use clipboard::{copy_snippet, copy_snippet_and_hold, ClipboardSink, SystemClipboard};
pub use config::{get_config_dir, Config, SCROLL_SPEED_MULTIPLIER};
pub use drag::{DragPhase, DragScrollController, DragState, PointerKind, ScrollViewport};
pub use error::{Result, SnipdexError};
pub use gesture::{EndReason, GestureEvent, GestureListener, GestureListeners, Subscription};
pub use links::open_url;
pub use models::{Category, Snippet, TutorialLink};
