//! pulso: a terminal news portal.
//!
//! Category feeds and search over a NewsAPI-compatible upstream, with
//! page-at-a-time loading, a featured article, sample articles when the
//! upstream is unavailable, and an in-memory saved list.
//!
//! - [`news`] - upstream adapter: query mapping, schema, normalization, client
//! - [`feed`] - feed pagination state machine and saved articles
//! - [`app`] - session state and the background fetch runtime
//! - [`ui`] - ratatui front end: panels, ticker, sidebar, help overlay
//! - [`keybindings`] - key to action mapping per panel
//! - [`config`] - TOML configuration

pub mod app;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod news;
pub mod theme;
pub mod ui;
pub mod util;
