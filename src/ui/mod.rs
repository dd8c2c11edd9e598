//! Terminal user interface.
//!
//! Logs go to stderr so they never interleave with the screen.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop, terminal management and the headless page loader
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Layout and view dispatch
//! - `articles` - Article list and excerpt preview
//! - `categories` - Category panel
//! - `sidebar` - Latest news and trending panels
//! - `ticker` - Headline ticker
//! - `status` - Status bar
//! - `help` - Keybinding overlay

mod articles;
mod categories;
mod events;
mod help;
mod input;
mod loop_runner;
mod render;
mod sidebar;
mod status;
mod ticker;

// Re-export the public API
pub use events::handle_app_event;
pub use loop_runner::{load_pages, run, Action};
